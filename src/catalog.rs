//! Catalog type and file I/O

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A versioned, timestamped collection of ABIs.
///
/// `abis` keeps its input order: directory-walk order for the merger,
/// first-seen order for the deduplicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub version: String,
    pub timestamp: i64,
    pub abis: Vec<Value>,
}

impl Catalog {
    /// Build a catalog stamped with the given wall-clock time.
    ///
    /// The clock is a parameter rather than a global read so runs are
    /// reproducible in tests. Without an explicit `version` the stamp is
    /// the date as `YYYYMMDD`.
    pub fn new(version: Option<String>, now: DateTime<Local>, abis: Vec<Value>) -> Self {
        Self {
            version: version.unwrap_or_else(|| default_version(now)),
            timestamp: now.timestamp(),
            abis,
        }
    }

    /// Read a catalog from a JSON file. Any read or parse failure is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read catalog {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parse catalog {}", path.display()))
    }

    /// Write the catalog as compact JSON.
    pub fn save_compact(&self, path: &Path) -> Result<()> {
        self.save(path, serde_json::to_string(self)?)
    }

    /// Write the catalog pretty-printed.
    pub fn save_pretty(&self, path: &Path) -> Result<()> {
        self.save(path, serde_json::to_string_pretty(self)?)
    }

    fn save(&self, path: &Path, content: String) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create output directory {}", parent.display()))?;
            }
        }
        fs::write(path, content).with_context(|| format!("write catalog {}", path.display()))
    }
}

/// Default catalog version: the local date as `YYYYMMDD`.
pub fn default_version(now: DateTime<Local>) -> String {
    now.format("%Y%m%d").to_string()
}
