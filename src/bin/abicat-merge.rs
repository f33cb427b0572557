//! Merge individual ABI JSON files into a single catalog

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use env_logger::Env;

use abicat::catalog::Catalog;
use abicat::merge;

#[derive(Debug, Parser)]
#[command(
    name = "abicat-merge",
    version,
    about = "Merge individual ABI JSON files into a single catalog"
)]
struct Args {
    /// Directory scanned recursively for .json ABI files
    #[arg(short = 'i', long, default_value = "repo")]
    input_dir: PathBuf,

    /// Catalog version (defaults to today's date as YYYYMMDD)
    #[arg(short = 'v', long)]
    version: Option<String>,

    /// Output catalog path
    #[arg(short = 'o', long, default_value = "build/abi.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();

    let abis = merge::merge_dir(&args.input_dir)?;
    let catalog = Catalog::new(args.version, Local::now(), abis);
    catalog.save_compact(&args.output)?;

    println!(
        "merged {} ABIs into {} (version {})",
        catalog.abis.len(),
        args.output.display(),
        catalog.version
    );

    Ok(())
}
