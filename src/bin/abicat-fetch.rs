//! Fetch and store ABI files from a CSV contract list

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use abicat::fetch::{self, EtherscanClient};

#[derive(Debug, Parser)]
#[command(
    name = "abicat-fetch",
    version,
    about = "Fetch and store ABI files from a CSV contract list"
)]
struct Args {
    /// CSV list of contracts: label,chain-id,address (no header)
    #[arg(short = 'l', long, default_value = "abi_list.csv")]
    csv_list: PathBuf,

    /// File containing the Etherscan API key
    #[arg(short = 'k', long, default_value = ".etherscan_apikey")]
    api_key: PathBuf,

    /// Directory the per-contract JSON files are written to
    #[arg(short = 'o', long, default_value = "repo")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();

    let api_key = fetch::read_api_key(&args.api_key)?;
    let rows = fetch::read_contract_list(&args.csv_list)?;

    let client = EtherscanClient::new(api_key);
    let summary = fetch::fetch_all(&client, &rows, &args.output, fetch::backoff_delay).await?;

    println!(
        "ok: {} ({} already present), failed: {}",
        summary.ok,
        summary.skipped,
        summary.failed.len()
    );
    for label in &summary.failed {
        println!("  failed: {}", label);
    }

    Ok(())
}
