// src/types.rs
use std::fmt;

/// One input line identifying a host to probe
pub type Target = String;

/// Certificate common name harvested from a single target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// Normalized URL that was requested
    pub url: String,

    /// Subject common name of the leaf certificate
    pub common_name: String,
}

impl FetchResult {
    /// Render the output line for this result
    pub fn to_line(&self, show_urls: bool) -> String {
        if show_urls {
            format!("{} {}", self.url, self.common_name)
        } else {
            self.common_name.clone()
        }
    }
}

/// Why a target produced no output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Target could not be turned into a request URL
    InvalidUrl,
    /// Request exceeded the configured timeout
    Timeout,
    /// TCP connect or TLS handshake failed
    Connect,
    /// Any other request failure (redirect loop, protocol error, ...)
    Request,
    /// Response carried no TLS session info (plain HTTP hop)
    NoTlsInfo,
    /// TLS session had no peer certificate
    NoPeerCertificate,
    /// Leaf certificate DER could not be parsed
    UnparsableCertificate,
    /// Leaf certificate subject has no common name
    EmptyCommonName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::InvalidUrl => "invalid url",
            SkipReason::Timeout => "timeout",
            SkipReason::Connect => "connect failed",
            SkipReason::Request => "request failed",
            SkipReason::NoTlsInfo => "no tls info",
            SkipReason::NoPeerCertificate => "no peer certificate",
            SkipReason::UnparsableCertificate => "unparsable certificate",
            SkipReason::EmptyCommonName => "empty common name",
        };
        write!(f, "{}", s)
    }
}

/// Result of probing a single target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(FetchResult),
    Skipped(SkipReason),
}

impl FetchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, FetchOutcome::Found(_))
    }
}
