// src/cli.rs
use crate::config::MAX_CONCURRENCY;
use clap::Parser;

/// cn-harvest: bulk TLS certificate common-name harvester
///
/// Reads hostnames or IP addresses (one per line), connects to each over
/// HTTPS and prints the subject common name of the presented certificate.
#[derive(Parser, Debug, Clone)]
#[command(name = "cn-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // ===== Input & Configuration =====
    /// Path to list of urls or ip addresses, defaults to stdin if left blank
    #[arg(short = 'f', long = "file", default_value = "")]
    pub input: String,

    /// Path to optional TOML config file
    #[arg(long = "config")]
    pub config: Option<String>,

    // ===== Scanning =====
    /// Number of concurrent requests to make [default: 10]
    #[arg(short = 'c', long = "concurrency")]
    pub concurrency: Option<usize>,

    /// Timeout in seconds, 0 disables the timeout [default: 5]
    #[arg(short = 't', long = "timeout")]
    pub timeout: Option<u64>,

    /// Follow redirects
    #[arg(short = 'r', long = "follow-redirects")]
    pub follow_redirects: bool,

    // ===== Output =====
    /// Show urls in output
    #[arg(short = 'u', long = "show-urls")]
    pub show_urls: bool,

    /// Write output to file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    // ===== Logging =====
    /// Verbose logging (set log level to debug)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Quiet logging (set log level to error)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// Validate flag combinations and return errors for invalid usage
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(c) = self.concurrency {
            if c == 0 || c > MAX_CONCURRENCY {
                anyhow::bail!("-c must be between 1 and {}", MAX_CONCURRENCY);
            }
        }

        if self.verbose && self.quiet {
            anyhow::bail!("Cannot specify both --verbose and --quiet");
        }

        Ok(())
    }

    /// Input file path, or `None` when reading stdin
    pub fn input_path(&self) -> Option<&str> {
        if self.input.is_empty() {
            None
        } else {
            Some(&self.input)
        }
    }

    /// Log level forced by flags, if any
    pub fn log_level(&self) -> Option<&str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}
