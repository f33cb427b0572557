//! Merge a directory of ABI JSON files into one catalog
//!
//! Files are discovered recursively and sorted lexicographically by path
//! before merging, so the resulting catalog is reproducible regardless of
//! filesystem walk order. Unlike the fetcher, errors here are fatal: a
//! file that fails to read or parse aborts the merge.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use walkdir::WalkDir;

/// Recursively collect `.json` files under `root`, sorted by path.
pub fn collect_json_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        paths.push(entry.into_path());
    }

    paths.sort();
    Ok(paths)
}

/// Parse every `.json` file under `root` as an opaque ABI document.
pub fn merge_dir(root: &Path) -> Result<Vec<Value>> {
    let mut abis = Vec::new();

    for path in collect_json_files(root)? {
        let content =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let abi: Value = serde_json::from_str(&content)
            .with_context(|| format!("parse {}", path.display()))?;
        log::debug!("merged {}", path.display());
        abis.push(abi);
    }

    Ok(abis)
}
