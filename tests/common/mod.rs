// Shared helpers for integration tests: mock HTTPS servers and output capture
#![allow(dead_code)]

use cn_harvest::fetch::{self, ConnectionPolicy, DispatchSummary, Dispatcher, Fetcher};
use cn_harvest::output::PlainOutput;
use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

/// What a mock server answers to every request
#[derive(Clone)]
pub enum MockResponse {
    Ok,
    Redirect(String),
}

impl MockResponse {
    fn render(&self) -> String {
        match self {
            MockResponse::Ok => {
                "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok".to_string()
            }
            MockResponse::Redirect(location) => format!(
                "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                location
            ),
        }
    }
}

fn tls_acceptor(common_name: Option<&str>) -> TlsAcceptor {
    let mut params = CertificateParams::new(vec!["localhost".to_string()]).unwrap();
    params.distinguished_name = DistinguishedName::new();
    if let Some(cn) = common_name {
        params.distinguished_name.push(DnType::CommonName, cn);
    }
    let key = KeyPair::generate().unwrap();
    let cert = params.self_signed(&key).unwrap();

    let key_der = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.serialize_der()));
    let config = rustls::ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .unwrap()
    .with_no_client_auth()
    .with_single_cert(vec![cert.der().clone()], key_der)
    .unwrap();

    TlsAcceptor::from(Arc::new(config))
}

/// Start an HTTPS server presenting a self-signed certificate with `common_name`
pub async fn start_tls_server(common_name: Option<&str>, response: MockResponse) -> SocketAddr {
    let acceptor = tls_acceptor(common_name);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let reply = response.render();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            let reply = reply.clone();

            tokio::spawn(async move {
                let Ok(mut tls) = acceptor.accept(stream).await else {
                    return;
                };

                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    match tls.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => {
                            request.extend_from_slice(&chunk[..n]);
                            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }

                let _ = tls.write_all(reply.as_bytes()).await;
                let _ = tls.shutdown().await;
            });
        }
    });

    addr
}

/// In-memory writer whose contents outlive the output handler
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Write::write(&mut *self.0.lock().unwrap(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    pub fn lines(&self) -> Vec<String> {
        let raw = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
        raw.lines().map(str::to_string).collect()
    }
}

/// Options for a single in-process harvest run
pub struct RunOptions {
    pub concurrency: usize,
    pub timeout: Duration,
    pub follow_redirects: bool,
    pub show_urls: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            timeout: Duration::from_secs(5),
            follow_redirects: false,
            show_urls: false,
        }
    }
}

/// Feed `targets` through the full pipeline and return the output lines
pub async fn run_harvest(targets: &[String], opts: RunOptions) -> (Vec<String>, DispatchSummary) {
    let policy = ConnectionPolicy {
        timeout: Some(opts.timeout),
        follow_redirects: opts.follow_redirects,
    };
    let fetcher = Arc::new(Fetcher::new(&policy).unwrap());
    let buf = SharedBuf::default();
    let output = Arc::new(PlainOutput::to_writer(buf.clone(), opts.show_urls));

    let mut input = targets.join("\n");
    input.push('\n');

    let dispatcher = Dispatcher::new(opts.concurrency, fetcher, output);
    let summary = fetch::harvest(io::Cursor::new(input.into_bytes()), dispatcher).await;

    (buf.lines(), summary)
}
