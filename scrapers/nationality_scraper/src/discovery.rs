use std::collections::BTreeSet;

use regex::Regex;
use tracing::{debug, info};

use crate::client::PageSource;
use crate::config::ScraperConfig;
use crate::error::Result;
use crate::types::{PlayerReference, TeamReference};

// Example: "/brasilien/startseite/verein/3439"
const TEAM_PATTERN: &str = r"/[a-z\-]+/startseite/verein/\d+";
// Example: "/ederson/profil/spieler/238223"
const PLAYER_PATTERN: &str = r"/[a-z\-]+/profil/spieler/\d+";

/// Finds team and player links by scanning raw markup for their path shapes.
pub struct Discoverer {
    team_pattern: Regex,
    player_pattern: Regex,
}

impl Discoverer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            team_pattern: Regex::new(TEAM_PATTERN)?,
            player_pattern: Regex::new(PLAYER_PATTERN)?,
        })
    }

    pub fn extract_team_references(&self, markup: &str) -> BTreeSet<TeamReference> {
        self.team_pattern
            .find_iter(markup)
            .filter_map(|m| TeamReference::from_path(m.as_str()))
            .collect()
    }

    pub fn extract_player_references(&self, markup: &str) -> BTreeSet<PlayerReference> {
        self.player_pattern
            .find_iter(markup)
            .filter_map(|m| PlayerReference::from_path(m.as_str()))
            .collect()
    }

    /// Crawls ranking pages `1..=pages` and unions the teams they link to.
    pub fn team_references(
        &self,
        source: &dyn PageSource,
        pages: u32,
    ) -> Result<BTreeSet<TeamReference>> {
        let mut teams = BTreeSet::new();
        for page in 1..=pages {
            let markup = source.get_text(&ScraperConfig::ranking_page_path(page))?;
            let found = self.extract_team_references(&markup);
            debug!(page, count = found.len(), "parsed ranking page");
            teams.extend(found);
        }
        info!("Found {} national teams across {} ranking pages", teams.len(), pages);
        Ok(teams)
    }

    pub fn player_references(
        &self,
        source: &dyn PageSource,
        team: &TeamReference,
    ) -> Result<BTreeSet<PlayerReference>> {
        let markup = source.get_text(&team.path())?;
        let players = self.extract_player_references(&markup);
        info!("{}: {} players", team, players.len());
        Ok(players)
    }
}
