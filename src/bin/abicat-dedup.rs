//! Deduplicate an ABI catalog, keeping one representative per token standard

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use env_logger::Env;

use abicat::catalog::Catalog;
use abicat::dedup;

#[derive(Debug, Parser)]
#[command(
    name = "abicat-dedup",
    version,
    about = "Deduplicate an ABI catalog by structural fingerprint"
)]
struct Args {
    /// Input catalog file
    #[arg(short = 'i', long, default_value = "build/abi.json")]
    input: PathBuf,

    /// Output catalog file
    #[arg(short = 'o', long, default_value = "build/abi_deduplicated.json")]
    output: PathBuf,

    /// Catalog version (defaults to today's date as YYYYMMDD)
    #[arg(short = 'v', long)]
    version: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();

    let catalog = Catalog::load(&args.input)?;
    println!("Original ABIs: {}", catalog.abis.len());

    let (retained, report) = dedup::dedup_abis(&catalog.abis);

    let out = Catalog::new(args.version, Local::now(), retained);
    out.save_pretty(&args.output)?;

    println!("Deduplicated ABIs: {}", report.retained);
    println!("ERC20 included: {}", report.erc20_included);
    println!("ERC721 included: {}", report.erc721_included);
    if report.dropped_conforming > 0 {
        println!(
            "Warning: dropped {} distinct standard-conforming ABIs beyond the per-standard cap",
            report.dropped_conforming
        );
    }
    println!("Saved to: {}", args.output.display());

    Ok(())
}
