//! Verify an output file: valid JSON, the expected record shape, finite numbers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use stockscan_lib::output::DEFAULT_OUTPUT_PATH;
use stockscan_lib::{read_records, validate_records};

#[derive(Args)]
pub struct CheckArgs {
    /// Output file to verify
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    pub path: PathBuf,
}

pub fn run(args: &CheckArgs) -> Result<()> {
    let records = read_records(&args.path)
        .with_context(|| format!("{} is not a valid record file", args.path.display()))?;
    validate_records(&records)?;
    eprintln!(
        "{}: {} records, all numeric fields finite",
        args.path.display(),
        records.len()
    );
    Ok(())
}
