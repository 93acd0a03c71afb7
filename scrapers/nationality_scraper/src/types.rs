use serde::{Deserialize, Serialize};
use std::fmt;

/// A national team roster page, e.g. `/brasilien/startseite/verein/3439`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TeamReference {
    pub slug: String,
    pub id: String,
}

/// A player profile page, e.g. `/ederson/profil/spieler/238223`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerReference {
    pub slug: String,
    pub id: String,
}

impl TeamReference {
    /// Splits a matched `/{slug}/startseite/verein/{id}` path.
    pub fn from_path(path: &str) -> Option<Self> {
        let (slug, id) = split_reference(path, "startseite/verein")?;
        Some(Self { slug, id })
    }

    pub fn path(&self) -> String {
        format!("/{}/startseite/verein/{}", self.slug, self.id)
    }
}

impl PlayerReference {
    pub fn from_path(path: &str) -> Option<Self> {
        let (slug, id) = split_reference(path, "profil/spieler")?;
        Some(Self { slug, id })
    }

    pub fn path(&self) -> String {
        format!("/{}/profil/spieler/{}", self.slug, self.id)
    }
}

impl fmt::Display for TeamReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl fmt::Display for PlayerReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn split_reference(path: &str, kind: &str) -> Option<(String, String)> {
    let rest = path.strip_prefix('/')?;
    let (slug, rest) = rest.split_once('/')?;
    let id = rest.strip_prefix(kind)?.strip_prefix('/')?;
    if slug.is_empty() || id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((slug.to_string(), id.to_string()))
}

/// One output row. Countries are empty strings when the page has no flag for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_name: String,
    pub country_birth: String,
    pub country_fifa: String,
}

impl PlayerRecord {
    pub const HEADERS: [&'static str; 3] = ["player_name", "country_birth", "country_fifa"];

    pub fn as_row(&self) -> [&str; 3] {
        [
            self.player_name.as_str(),
            self.country_birth.as_str(),
            self.country_fifa.as_str(),
        ]
    }
}
