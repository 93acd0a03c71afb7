use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    pub base_url: String,
    /// Number of FIFA ranking list pages to crawl for team links.
    pub ranking_pages: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.transfermarkt.co.uk".to_string(),
            ranking_pages: 9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub user_agent: String,
    /// `None` means requests may block indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub fetch_workers: usize,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; NationalityScraper/1.0)".to_string(),
            // SCRAPER_TIMEOUT_SECS=0 turns this off and requests block until the server answers.
            request_timeout_secs: Some(30),
            fetch_workers: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathsConfig {
    pub html_dir: PathBuf,
    pub results_dir: PathBuf,
    pub output_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            html_dir: PathBuf::from("data_html"),
            results_dir: PathBuf::from("results"),
            output_file: "nationality_players.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScraperConfig {
    pub site: SiteConfig,
    pub scraping: ScrapingConfig,
    pub paths: PathsConfig,
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = env::var("SCRAPER_BASE_URL") {
            config.site.base_url = base_url;
        }
        if let Some(pages) = parse_var::<u32>("SCRAPER_RANKING_PAGES") {
            config.site.ranking_pages = pages;
        }
        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Some(timeout) = parse_var::<u64>("SCRAPER_TIMEOUT_SECS") {
            config.scraping.request_timeout_secs = (timeout > 0).then_some(timeout);
        }
        if let Some(workers) = parse_var::<usize>("SCRAPER_FETCH_WORKERS") {
            config.scraping.fetch_workers = workers.max(1);
        }
        if let Ok(dir) = env::var("SCRAPER_HTML_DIR") {
            config.paths.html_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("SCRAPER_RESULTS_DIR") {
            config.paths.results_dir = PathBuf::from(dir);
        }
        if let Ok(file) = env::var("SCRAPER_OUTPUT_FILE") {
            config.paths.output_file = file;
        }

        config
    }

    pub fn output_path(&self) -> PathBuf {
        self.paths.results_dir.join(&self.paths.output_file)
    }

    /// Relative path of one FIFA world ranking page (1-based).
    pub fn ranking_page_path(page: u32) -> String {
        format!("/statistik/weltrangliste?ajax=yw1&page={page}")
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
