use std::fs;

use serde::Serialize;
use tracing::info;

use crate::client::PageSource;
use crate::config::ScraperConfig;
use crate::dataset::{delete_html_files, write_dataset};
use crate::error::{Result, ScrapeError};
use crate::player_html_scraper::{DownloadSummary, PlayerHtmlScraper};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Leave the saved pages in place after a successful transform.
    pub keep_html: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub download: DownloadSummary,
    pub records_written: usize,
    pub html_files_deleted: usize,
}

/// Transform stage on its own: saved pages -> CSV, then optional cleanup.
pub fn transform(config: &ScraperConfig, options: RunOptions) -> Result<(usize, usize)> {
    let html_dir = &config.paths.html_dir;
    fs::create_dir_all(html_dir).map_err(|e| ScrapeError::filesystem(html_dir, e))?;

    let output = config.output_path();
    let records = write_dataset(html_dir, &output)?;
    let deleted = if options.keep_html {
        0
    } else {
        delete_html_files(&config.paths.html_dir)?
    };
    Ok((records, deleted))
}

/// Download, transform, then clean up. Any error stops the run with the saved pages left on disk.
pub fn run(config: &ScraperConfig, source: &dyn PageSource, options: RunOptions) -> Result<RunSummary> {
    let download = PlayerHtmlScraper::new(config.clone(), source)?.run()?;
    let (records_written, html_files_deleted) = transform(config, options)?;

    let summary = RunSummary {
        download,
        records_written,
        html_files_deleted,
    };
    info!(?summary, "Run complete");
    Ok(summary)
}
