// src/main.rs
use anyhow::Context;
use clap::Parser;
use cn_harvest::cli::Cli;
use cn_harvest::config::{Config, ScanSettings};
use cn_harvest::fetch::{self, ConnectionPolicy, Dispatcher, Fetcher};
use cn_harvest::output::{OutputHandler, PlainOutput};
use cn_harvest::source;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    let config = match cli.config {
        Some(ref path) => Config::from_file(Path::new(path))
            .with_context(|| format!("unable to load config file {}", path))?,
        None => Config::default(),
    };

    let settings = ScanSettings::resolve(&cli, &config)?;

    // Logs go to stderr so stdout stays clean for piping
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_level))
        .with_writer(std::io::stderr)
        .init();

    // Open input before anything else so a bad path fails fast
    let input = source::open_input(cli.input_path()).await?;

    let output: Arc<dyn OutputHandler> = match cli.output {
        Some(ref path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("unable to create output file {}", path))?;
            tracing::info!("Writing output to: {}", path);
            Arc::new(PlainOutput::to_file(file, settings.show_urls))
        }
        None => Arc::new(PlainOutput::new(settings.show_urls)),
    };

    let policy = ConnectionPolicy::from_settings(&settings);
    tracing::debug!("Connection policy: {:?}", policy);
    let fetcher = Arc::new(Fetcher::new(&policy)?);

    let dispatcher = Dispatcher::new(settings.concurrency, fetcher, output);
    let summary = fetch::harvest(input, dispatcher).await;

    tracing::info!(
        "Done: {} workers, {} targets, {} certificates",
        summary.workers_finished,
        summary.stats.total_processed,
        summary.stats.found
    );

    Ok(())
}
