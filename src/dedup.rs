//! Structural deduplication with a one-representative cap per standard
//!
//! Duplicates are detected by fingerprint, in input order, first seen wins.
//! ERC20 and ERC721 conforming ABIs are additionally capped at one kept
//! representative each: the downstream consumer matches contracts by ABI
//! shape, so a second distinct-but-conforming token ABI adds nothing.
//! Dropping those is intentional policy; they are counted so callers can
//! see it happening.

use std::collections::HashSet;

use serde_json::Value;

use crate::classify::TokenStandard;
use crate::fingerprint::Fingerprint;

/// Outcome counters for one dedup pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DedupReport {
    pub original: usize,
    pub retained: usize,
    pub erc20_included: bool,
    pub erc721_included: bool,
    /// Exact structural duplicates skipped.
    pub duplicates: usize,
    /// Distinct standard-conforming ABIs dropped because their standard's
    /// representative slot was already filled.
    pub dropped_conforming: usize,
}

/// Deduplicate `abis`, preserving first-occurrence order.
pub fn dedup_abis(abis: &[Value]) -> (Vec<Value>, DedupReport) {
    let mut report = DedupReport {
        original: abis.len(),
        ..DedupReport::default()
    };

    let mut seen: HashSet<Fingerprint> = HashSet::new();
    let mut retained: Vec<Value> = Vec::new();

    for (index, abi) in abis.iter().enumerate() {
        if !seen.insert(Fingerprint::of(abi)) {
            report.duplicates += 1;
            continue;
        }

        let is_erc20 = TokenStandard::Erc20.matches(abi);
        let is_erc721 = TokenStandard::Erc721.matches(abi);

        if is_erc20 && !report.erc20_included {
            log::info!("including ERC20 ABI (index {})", index);
            retained.push(abi.clone());
            report.erc20_included = true;
        } else if is_erc721 && !report.erc721_included {
            log::info!("including ERC721 ABI (index {})", index);
            retained.push(abi.clone());
            report.erc721_included = true;
        } else if !is_erc20 && !is_erc721 {
            retained.push(abi.clone());
        } else {
            log::warn!(
                "dropping distinct standard-conforming ABI (index {}): representative already kept",
                index
            );
            report.dropped_conforming += 1;
        }
    }

    report.retained = retained.len();
    (retained, report)
}
