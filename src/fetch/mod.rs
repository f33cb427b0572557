//! Fetch and store ABI files for a list of contracts
//!
//! One blocking-style request at a time, in row order. A row whose output
//! file already exists is skipped, which makes an interrupted run safely
//! resumable. Row failures are isolated: they are retried, then recorded,
//! and the batch continues.

mod etherscan;
mod list;
mod retry;

pub use etherscan::{AbiSource, EtherscanClient, FetchError};
pub use list::{read_contract_list, ContractRow};
pub use retry::retry_async;

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

/// Attempts per row, including the first.
pub const MAX_ATTEMPTS: usize = 3;

/// Backoff schedule: 2^attempt seconds after failed attempt `attempt`.
pub fn backoff_delay(attempt: usize) -> Duration {
    Duration::from_secs(1u64 << attempt)
}

/// Tally of one fetch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    /// Rows fetched successfully or skipped as already present.
    pub ok: usize,
    /// Rows skipped because their output file already existed.
    pub skipped: usize,
    /// Labels whose retries were exhausted.
    pub failed: Vec<String>,
}

/// Read the API key file, stripping trailing whitespace and newlines.
pub fn read_api_key(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read API key file {}", path.display()))?;
    let key = raw.trim().to_string();
    ensure!(!key.is_empty(), "API key file {} is empty", path.display());
    Ok(key)
}

/// Fetch an ABI file for every row whose `{out_dir}/{label}.json` does not
/// exist yet. The delay schedule is injectable so tests run without
/// sleeping.
pub async fn fetch_all<D>(
    source: &dyn AbiSource,
    rows: &[ContractRow],
    out_dir: &Path,
    delay_of: D,
) -> Result<FetchSummary>
where
    D: Fn(usize) -> Duration,
{
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;

    let mut summary = FetchSummary::default();

    for row in rows {
        let out = out_dir.join(format!("{}.json", row.label));
        if out.exists() {
            log::info!("{}: already present, skipping", row.label);
            summary.ok += 1;
            summary.skipped += 1;
            continue;
        }

        let result = retry_async(
            |attempt| {
                if attempt > 1 {
                    log::info!("{}: attempt {}/{}", row.label, attempt, MAX_ATTEMPTS);
                }
                source.fetch_abi(row.chain_id, &row.address)
            },
            MAX_ATTEMPTS,
            &delay_of,
            FetchError::is_transient,
        )
        .await;

        match result {
            Ok(abi) => {
                let pretty = serde_json::to_string_pretty(&abi)?;
                fs::write(&out, pretty)
                    .with_context(|| format!("write {}", out.display()))?;
                log::info!("{}: saved {}", row.label, out.display());
                summary.ok += 1;
            }
            Err(err) => {
                log::error!("{}: giving up: {}", row.label, err);
                summary.failed.push(row.label.clone());
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn no_delay(_attempt: usize) -> Duration {
        Duration::from_millis(0)
    }

    fn temp_dir(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("abicat_fetch_{}_{}", std::process::id(), name));
        path
    }

    /// Counts calls; fails every lookup for addresses listed in `poison`.
    struct FakeSource {
        calls: AtomicUsize,
        poison: Vec<String>,
    }

    impl FakeSource {
        fn new(poison: &[&str]) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                poison: poison.iter().map(|s| s.to_string()).collect(),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    #[async_trait]
    impl AbiSource for FakeSource {
        async fn fetch_abi(&self, _chain_id: u64, address: &str) -> Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.poison.iter().any(|p| p == address) {
                return Err(FetchError::Rejected {
                    address: address.to_string(),
                    message: "NOTOK".to_string(),
                });
            }
            Ok(json!([{"type": "function", "name": "ping", "inputs": []}]))
        }
    }

    fn rows(specs: &[(&str, &str)]) -> Vec<ContractRow> {
        specs
            .iter()
            .map(|(label, address)| ContractRow {
                label: label.to_string(),
                chain_id: 1,
                address: address.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_second_run_makes_no_network_calls() {
        let dir = temp_dir("idempotent");
        let rows = rows(&[("a", "0x1"), ("b", "0x2")]);

        let source = FakeSource::new(&[]);
        let first = fetch_all(&source, &rows, &dir, no_delay).await.unwrap();
        assert_eq!(first.ok, 2);
        assert_eq!(source.calls(), 2);

        let second = fetch_all(&source, &rows, &dir, no_delay).await.unwrap();
        assert_eq!(second.ok, 2);
        assert_eq!(second.skipped, 2);
        assert_eq!(source.calls(), 2, "no additional calls expected");

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_failed_row_does_not_abort_batch() {
        let dir = temp_dir("isolate");
        let rows = rows(&[("good", "0x1"), ("bad", "0xdead"), ("tail", "0x3")]);

        let source = FakeSource::new(&["0xdead"]);
        let summary = fetch_all(&source, &rows, &dir, no_delay).await.unwrap();

        assert_eq!(summary.ok, 2);
        assert_eq!(summary.failed, vec!["bad".to_string()]);
        assert!(dir.join("good.json").exists());
        assert!(!dir.join("bad.json").exists());
        assert!(dir.join("tail.json").exists());

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_transient_failures_retried_to_limit() {
        let dir = temp_dir("retries");
        let rows = rows(&[("bad", "0xdead")]);

        let source = FakeSource::new(&["0xdead"]);
        let summary = fetch_all(&source, &rows, &dir, no_delay).await.unwrap();

        assert_eq!(summary.failed.len(), 1);
        assert_eq!(source.calls(), MAX_ATTEMPTS);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_written_file_is_pretty_printed() {
        let dir = temp_dir("pretty");
        let rows = rows(&[("a", "0x1")]);

        let source = FakeSource::new(&[]);
        fetch_all(&source, &rows, &dir, no_delay).await.unwrap();

        let content = std::fs::read_to_string(dir.join("a.json")).unwrap();
        assert!(content.contains('\n'), "expected indented output");
        let parsed: Value = serde_json::from_str(&content).unwrap();
        assert!(parsed.is_array());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_backoff_schedule() {
        assert_eq!(backoff_delay(1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2), Duration::from_secs(4));
    }

    #[test]
    fn test_api_key_trimmed() {
        let mut path = std::env::temp_dir();
        path.push(format!("abicat_fetch_{}_key", std::process::id()));
        std::fs::write(&path, "SECRETKEY123\n").unwrap();
        assert_eq!(read_api_key(&path).unwrap(), "SECRETKEY123");

        std::fs::write(&path, "   \n").unwrap();
        assert!(read_api_key(&path).is_err());

        std::fs::remove_file(path).ok();
    }
}
