// src/fetch/client.rs
use anyhow::{Context, Result};
use reqwest::header::{CONNECTION, HeaderValue};
use reqwest::redirect;
use reqwest::tls::TlsInfo;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::cert_parser::CertificateParser;
use crate::config::ScanSettings;
use crate::types::{FetchOutcome, FetchResult, SkipReason};

/// Immutable network policy shared by every worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionPolicy {
    /// Per-request timeout covering connect, handshake and body; `None` disables it
    pub timeout: Option<Duration>,
    /// Follow redirects and inspect the final hop instead of the first
    pub follow_redirects: bool,
}

impl ConnectionPolicy {
    pub fn from_settings(settings: &ScanSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            follow_redirects: settings.follow_redirects,
        }
    }

    /// Build the HTTP client for this policy
    ///
    /// Certificate verification is always disabled: the point is to read
    /// whatever the host presents. No idle connections are pooled, so every
    /// request performs its own TLS handshake.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        let redirect_policy = if self.follow_redirects {
            redirect::Policy::default()
        } else {
            redirect::Policy::none()
        };

        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .tls_info(true)
            .redirect(redirect_policy)
            .pool_max_idle_per_host(0);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().context("Failed to build HTTP client")
    }
}

/// Prefix `target` with `https://` unless it already starts with it
///
/// Only the exact `https://` prefix is recognised, so a target such as
/// `http://host` becomes `https://http://host` and yields nothing.
pub fn normalize_target(target: &str) -> String {
    if target.starts_with("https://") {
        target.to_string()
    } else {
        format!("https://{}", target)
    }
}

/// Performs one certificate fetch per target
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(policy: &ConnectionPolicy) -> Result<Self> {
        Ok(Self {
            client: policy.build_client()?,
        })
    }

    /// Request `target` and extract the leaf certificate's common name
    ///
    /// Never fails: every problem is reported as `FetchOutcome::Skipped`.
    pub async fn fetch(&self, target: &str) -> FetchOutcome {
        let url = normalize_target(target);

        let parsed = match Url::parse(&url) {
            Ok(u) => u,
            Err(_) => return FetchOutcome::Skipped(SkipReason::InvalidUrl),
        };

        let mut response = match self
            .client
            .get(parsed)
            .header(CONNECTION, HeaderValue::from_static("close"))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return FetchOutcome::Skipped(classify_error(&e)),
        };

        let peer_cert = response
            .extensions()
            .get::<TlsInfo>()
            .map(|info| info.peer_certificate().map(<[u8]>::to_vec));

        // Drain the body so the connection can be torn down cleanly
        loop {
            match response.chunk().await {
                Ok(Some(_)) => continue,
                Ok(None) => break,
                Err(e) => {
                    debug!("Body read for {} ended early: {}", url, e);
                    break;
                }
            }
        }
        drop(response);

        let der = match peer_cert {
            None => return FetchOutcome::Skipped(SkipReason::NoTlsInfo),
            Some(None) => return FetchOutcome::Skipped(SkipReason::NoPeerCertificate),
            Some(Some(der)) => der,
        };

        match CertificateParser::common_name(&der) {
            Ok(Some(common_name)) => FetchOutcome::Found(FetchResult { url, common_name }),
            Ok(None) => FetchOutcome::Skipped(SkipReason::EmptyCommonName),
            Err(_) => FetchOutcome::Skipped(SkipReason::UnparsableCertificate),
        }
    }
}

fn classify_error(e: &reqwest::Error) -> SkipReason {
    if e.is_timeout() {
        SkipReason::Timeout
    } else if e.is_builder() {
        SkipReason::InvalidUrl
    } else if e.is_connect() {
        SkipReason::Connect
    } else {
        SkipReason::Request
    }
}
