//! abicat: tools for building a contract ABI catalog.
//!
//! Three independent command-line tools share this library:
//! - `abicat-fetch` pulls ABIs from an Etherscan-style API, one JSON file
//!   per contract
//! - `abicat-merge` folds a directory of ABI files into a single catalog
//! - `abicat-dedup` drops structural duplicates from a catalog, keeping at
//!   most one ERC20 and one ERC721 representative

pub mod catalog;
pub mod classify;
pub mod dedup;
pub mod fetch;
pub mod fingerprint;
pub mod merge;
