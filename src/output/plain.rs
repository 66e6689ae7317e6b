//! Line-oriented text output

use crate::output::OutputHandler;
use crate::types::FetchResult;
use async_trait::async_trait;
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes one line per result: `<cn>` or `<url> <cn>`
pub struct PlainOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    show_urls: bool,
}

impl PlainOutput {
    /// Create a new PlainOutput that writes to stdout
    pub fn new(show_urls: bool) -> Self {
        Self::to_writer(io::stdout(), show_urls)
    }

    /// Create a new PlainOutput that writes to a file
    pub fn to_file(file: std::fs::File, show_urls: bool) -> Self {
        Self::to_writer(file, show_urls)
    }

    pub fn to_writer<W: Write + Send + 'static>(writer: W, show_urls: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            show_urls,
        }
    }
}

#[async_trait]
impl OutputHandler for PlainOutput {
    async fn emit(&self, result: &FetchResult) -> anyhow::Result<()> {
        let line = result.to_line(self.show_urls);
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow::anyhow!("output writer lock poisoned"))?;

        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }

    async fn flush(&self) -> anyhow::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow::anyhow!("output writer lock poisoned"))?;
        writer.flush()?;
        Ok(())
    }
}
