//! PRSA Dataset Formatter
//!
//! Converts the PRSA hourly weather/pollution CSV into a plain-text,
//! space-delimited file split into train/test feature and label blocks.

mod data;
mod writer;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use data::{DataLoader, DataProcessor};
use writer::DatasetWriter;

#[derive(Parser)]
#[command(
    version,
    about = "Convert the PRSA air-quality CSV into train/test text blocks"
)]
struct Args {
    /// Path to the PRSA CSV file
    #[arg(long, default_value = "data/PRSA_data_2010.1.1-2014.12.31.csv")]
    input: PathBuf,

    /// Directory the output file is written into
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    /// Number of rows in the train partition
    #[arg(long, default_value_t = 500, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    train_size: usize,

    /// Number of rows in the test partition
    #[arg(long, default_value_t = 100, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    test_size: usize,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env).init();

    let args = Args::parse();
    let path = run(&args)?;
    info!(path = %path.display(), "dataset written");

    Ok(())
}

/// Load, clean, partition, and write. Returns the output file path.
fn run(args: &Args) -> Result<PathBuf> {
    let df = DataLoader::load_csv(&args.input)?;
    info!(rows = df.height(), cols = df.width(), "loaded source table");

    let cleaned = DataProcessor::clean(&df)?;
    info!(rows = cleaned.height(), "cleaned table");

    let (x, y) = DataProcessor::project(&cleaned)?;
    let parts = DataProcessor::partition(&x, &y, args.train_size, args.test_size)?;
    info!(
        train = args.train_size,
        test = args.test_size,
        "partitioned rows"
    );

    fs::create_dir_all(&args.out_dir)?;
    let path = DatasetWriter::write(&parts, &args.out_dir, args.train_size, args.test_size)?;

    Ok(path)
}
