// src/cert_parser.rs
use anyhow::Result;
use x509_parser::prelude::*;

/// Extracts the subject common name from leaf certificates
pub struct CertificateParser;

impl CertificateParser {
    /// Parse a DER-encoded certificate and return its subject common name
    ///
    /// Returns `Ok(None)` when the subject has no common name or it is empty.
    /// When several CN attributes are present the last one wins.
    pub fn common_name(der_bytes: &[u8]) -> Result<Option<String>> {
        let (_, cert) = X509Certificate::from_der(der_bytes)
            .map_err(|e| anyhow::anyhow!("Failed to parse X.509 certificate: {:?}", e))?;

        Ok(Self::extract_cn(&cert))
    }

    fn extract_cn(cert: &X509Certificate) -> Option<String> {
        last_common_name(cert.subject().iter_common_name().map(|attr| attr.as_str().ok()))
    }
}

/// Pick the last CN attribute; it yields nothing if that attribute is not a
/// readable string, even when an earlier one is
fn last_common_name<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Option<String> {
    values
        .last()
        .flatten()
        .filter(|cn| !cn.is_empty())
        .map(str::to_string)
}
