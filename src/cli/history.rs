//! Published URLs remembered per source file
//!
//! Republishing a file updates the artifact it was last published to.

use chrono::{DateTime, Utc};
use pubflow::error::Result;
use pubflow::types::PublishResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct HistoryEntry {
    url: Url,
    path: String,
    published_at: DateTime<Utc>,
}

/// On-disk map from source file to its published artifact
#[derive(Debug, Default)]
pub struct History {
    location: Option<PathBuf>,
    entries: BTreeMap<String, HistoryEntry>,
}

impl History {
    /// Default location of the history file
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("pubflow").join("history.json"))
    }

    /// Load history from `location`; a missing file yields empty history
    pub fn load(location: Option<PathBuf>) -> Result<Self> {
        let entries = match &location {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading publish history");
                serde_json::from_str(&std::fs::read_to_string(path)?)?
            }
            _ => BTreeMap::new(),
        };
        Ok(Self { location, entries })
    }

    fn key(source: &Path) -> String {
        source
            .canonicalize()
            .unwrap_or_else(|_| source.to_path_buf())
            .display()
            .to_string()
    }

    /// URL `source` was last published to
    pub fn url_for(&self, source: &Path) -> Option<Url> {
        self.entries.get(&Self::key(source)).map(|e| e.url.clone())
    }

    /// Remember that `source` was published as `result`
    pub fn record(&mut self, source: &Path, result: &PublishResult) {
        self.entries.insert(
            Self::key(source),
            HistoryEntry {
                url: result.view_url.clone(),
                path: result.path.clone(),
                published_at: Utc::now(),
            },
        );
    }

    /// Write history back to disk, if it has a location
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.location else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}
