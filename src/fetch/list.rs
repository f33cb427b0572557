//! Contract list parsing
//!
//! The list is headerless CSV, one contract per row: `label,chain-id,address`.

use std::path::Path;

use anyhow::{ensure, Context, Result};

/// One row of the contract list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRow {
    pub label: String,
    pub chain_id: u64,
    pub address: String,
}

/// Read and validate the contract list. Malformed rows are fatal.
pub fn read_contract_list(path: &Path) -> Result<Vec<ContractRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("open contract list {}", path.display()))?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read contract list {}", path.display()))?;
        let line = i + 1;
        ensure!(
            record.len() >= 3,
            "{} line {}: expected label,chain-id,address",
            path.display(),
            line
        );
        let chain_id: u64 = record[1]
            .parse()
            .with_context(|| format!("{} line {}: invalid chain id '{}'", path.display(), line, &record[1]))?;
        rows.push(ContractRow {
            label: record[0].to_string(),
            chain_id,
            address: record[2].to_string(),
        });
    }

    Ok(rows)
}
