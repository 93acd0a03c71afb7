use std::{
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
    thread,
};

use serde::Serialize;
use tracing::{error, info};

use crate::client::PageSource;
use crate::config::ScraperConfig;
use crate::discovery::Discoverer;
use crate::error::{Result, ScrapeError};
use crate::types::{PlayerReference, TeamReference};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadSummary {
    pub teams: usize,
    pub players: usize,
    pub pages_written: usize,
}

/// A player page to fetch together with the team it was found under.
#[derive(Debug, Clone)]
struct FetchJob {
    team: TeamReference,
    player: PlayerReference,
}

/// `{team_slug}_{player_id}.html`, unique per team and player id.
pub fn saved_page_filename(team: &TeamReference, player: &PlayerReference) -> String {
    format!("{}_{}.html", team.slug, player.id)
}

/// Downloads every national-team player profile into the HTML directory.
pub struct PlayerHtmlScraper<'a> {
    config: ScraperConfig,
    source: &'a dyn PageSource,
    discoverer: Discoverer,
}

impl<'a> PlayerHtmlScraper<'a> {
    pub fn new(config: ScraperConfig, source: &'a dyn PageSource) -> Result<Self> {
        Ok(Self {
            config,
            source,
            discoverer: Discoverer::new()?,
        })
    }

    fn html_dir(&self) -> &Path {
        &self.config.paths.html_dir
    }

    /// Fetches one player page and writes its body verbatim, replacing any earlier copy.
    pub fn fetch_player_page(
        &self,
        team: &TeamReference,
        player: &PlayerReference,
    ) -> Result<PathBuf> {
        let html = self.source.get_text(&player.path())?;
        let filepath = self.html_dir().join(saved_page_filename(team, player));
        fs::write(&filepath, &html).map_err(|e| ScrapeError::filesystem(&filepath, e))?;
        info!("Wrote {} ({} bytes) to {:?}", player, html.len(), filepath);
        Ok(filepath)
    }

    fn gather_jobs(&self) -> Result<(usize, Vec<FetchJob>)> {
        let teams = self
            .discoverer
            .team_references(self.source, self.config.site.ranking_pages)?;

        let mut jobs = Vec::new();
        for team in &teams {
            let players = self.discoverer.player_references(self.source, team)?;
            jobs.extend(players.into_iter().map(|player| FetchJob {
                team: team.clone(),
                player,
            }));
        }
        Ok((teams.len(), jobs))
    }

    fn fetch_all(&self, jobs: Vec<FetchJob>) -> Result<usize> {
        let total = jobs.len();
        let workers = self.config.scraping.fetch_workers.clamp(1, total.max(1));
        if workers == 1 {
            for job in &jobs {
                self.fetch_player_page(&job.team, &job.player)?;
            }
            return Ok(total);
        }

        let queue = Mutex::new(VecDeque::from(jobs));
        info!("Starting {} fetch workers for {} pages", workers, total);

        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|i| {
                    let queue = &queue;
                    scope.spawn(move || -> Result<usize> {
                        let mut written = 0;
                        while let Some(job) = pop_job(queue) {
                            if let Err(e) = self.fetch_player_page(&job.team, &job.player) {
                                error!("Worker {} failed on {}: {}", i, job.player, e);
                                // Drain so the other workers stop after their current page.
                                lock_queue(queue).clear();
                                return Err(e);
                            }
                            written += 1;
                        }
                        Ok(written)
                    })
                })
                .collect();

            let mut written = 0;
            let mut first_error = None;
            for handle in handles {
                match handle.join() {
                    Ok(Ok(n)) => written += n,
                    Ok(Err(e)) => {
                        first_error.get_or_insert(e);
                    }
                    Err(_) => {
                        first_error.get_or_insert(ScrapeError::WorkerPanicked);
                    }
                }
            }
            match first_error {
                Some(e) => Err(e),
                None => Ok(written),
            }
        })
    }

    pub fn run(&self) -> Result<DownloadSummary> {
        info!("Starting player HTML download");
        let html_dir = self.html_dir();
        fs::create_dir_all(html_dir).map_err(|e| ScrapeError::filesystem(html_dir, e))?;

        let (teams, jobs) = self.gather_jobs()?;
        let players = jobs.len();
        info!("Found {} player pages across {} teams", players, teams);

        let pages_written = self.fetch_all(jobs)?;
        let summary = DownloadSummary {
            teams,
            players,
            pages_written,
        };
        info!(?summary, "Download complete");
        Ok(summary)
    }
}

fn lock_queue(queue: &Mutex<VecDeque<FetchJob>>) -> std::sync::MutexGuard<'_, VecDeque<FetchJob>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn pop_job(queue: &Mutex<VecDeque<FetchJob>>) -> Option<FetchJob> {
    lock_queue(queue).pop_front()
}
