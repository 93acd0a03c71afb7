pub mod client;
pub mod config;
pub mod dataset;
pub mod discovery;
pub mod error;
pub mod pipeline;
pub mod player_html_scraper;
pub mod player_page;
pub mod types;
pub mod utils;

pub use error::{Result, ScrapeError};
