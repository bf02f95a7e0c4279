//! The static track catalog (`songdatabase.json`) and asset URL helpers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{ASSET_PREFIX, CATALOG_PATH, COVER_IMAGE_DIR, TRACK_AUDIO_DIR};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalog ids are numbers in some entries and strings in others.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackId::Number(n) => write!(f, "{}", n),
            TrackId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub coverimage: String,
    #[serde(default)]
    pub link: String,
}

impl Track {
    /// Entry for a bare `?track=<path>` with no catalog record.
    pub fn ad_hoc(path: &str) -> Self {
        let title = path
            .rsplit('/')
            .next()
            .unwrap_or(path)
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(path);
        Self {
            id: TrackId::Text(path.to_string()),
            artist: String::new(),
            title: title.to_string(),
            description: String::new(),
            coverimage: String::new(),
            link: path.to_string(),
        }
    }

    pub fn cover_url(&self) -> Option<String> {
        if self.coverimage.is_empty() {
            return None;
        }
        Some(in_dir(COVER_IMAGE_DIR, &self.coverimage))
    }

    pub fn track_url(&self) -> String {
        in_dir(TRACK_AUDIO_DIR, &self.link)
    }

    /// Player page for this entry.
    pub fn player_link(&self) -> String {
        format!("/trackplayer?mix={}", self.id)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let tracks: Vec<Track> = serde_json::from_str(text)?;
        log::debug!("[catalog] {} tracks", tracks.len());
        Ok(Self { tracks })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn select(&self, query: &CatalogQuery) -> Vec<Track> {
        match query {
            CatalogQuery::All => self.tracks.clone(),
            CatalogQuery::Mix(id) => self
                .tracks
                .iter()
                .filter(|t| t.id.to_string() == *id)
                .cloned()
                .collect(),
            CatalogQuery::Track(path) => vec![Track::ad_hoc(path)],
        }
    }
}

/// Which entries a page shows, from its query string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogQuery {
    All,
    Mix(String),
    Track(String),
}

impl CatalogQuery {
    /// `mix` wins over `track`; empty values count as absent.
    pub fn from_params(mix: Option<&str>, track: Option<&str>) -> Self {
        let present = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        match (present(mix), present(track)) {
            (Some(id), _) => CatalogQuery::Mix(id),
            (None, Some(path)) => CatalogQuery::Track(path),
            (None, None) => CatalogQuery::All,
        }
    }
}

pub fn catalog_url() -> String {
    asset_url(CATALOG_PATH)
}

/// Resolve a path onto the asset prefix; absolute URLs pass through.
pub fn asset_url(path: &str) -> String {
    if is_absolute(path) {
        return path.to_string();
    }
    format!("{}/{}", ASSET_PREFIX, path.trim_start_matches('/'))
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("https://") || path.starts_with("http://")
}

// Bare file names live in `dir`; anything with a path is taken as given.
fn in_dir(dir: &str, path: &str) -> String {
    if is_absolute(path) || path.contains('/') {
        asset_url(path)
    } else {
        asset_url(&format!("{}/{}", dir, path))
    }
}
