use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{fs, path::PathBuf};
use tracing::info;

use nationality_scraper::{
    client::HttpPageSource,
    config::ScraperConfig,
    pipeline::{self, RunOptions},
    player_html_scraper::PlayerHtmlScraper,
    player_page::parse_player_page,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Download every player page, write the CSV and delete the HTML
    Run {
        /// Keep the downloaded HTML files after the CSV is written
        #[arg(long)]
        keep_html: bool,
    },
    /// Only download player pages into the HTML directory
    Download,
    /// Only turn already downloaded pages into the CSV
    Transform {
        #[arg(long)]
        keep_html: bool,
    },
    /// Extract a single saved page and print it as JSON
    ProcessFile {
        /// Path to the HTML file to process
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Print the effective configuration
    ShowConfig,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ScraperConfig::from_env();

    match cli.command {
        Commands::Run { keep_html } => {
            let source = HttpPageSource::new(&config)?;
            let summary = pipeline::run(&config, &source, RunOptions { keep_html })
                .context("scrape run failed")?;
            info!(
                "Wrote {} records to {:?}",
                summary.records_written,
                config.output_path()
            );
        }
        Commands::Download => {
            let source = HttpPageSource::new(&config)?;
            PlayerHtmlScraper::new(config.clone(), &source)?
                .run()
                .context("download failed")?;
        }
        Commands::Transform { keep_html } => {
            let (records, _) = pipeline::transform(&config, RunOptions { keep_html })
                .with_context(|| format!("failed to transform {:?}", config.paths.html_dir))?;
            info!("Wrote {} records to {:?}", records, config.output_path());
        }
        Commands::ProcessFile { file } => {
            let html = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {:?}", file))?;
            info!("Processing player page: {:?}", file);
            let record = parse_player_page(&html)
                .with_context(|| format!("failed to parse {:?}", file))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
