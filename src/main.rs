//! Monarch Migrate CLI
//!
//! Converts every Personal Capital CSV export in an input directory into a
//! Monarch Money import file in an output directory.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --input-dir input --output-dir output --config category_mappings.toml
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clap::Parser;
use monarch_migrate::config::DEFAULT_CONFIG_FILE;
use monarch_migrate::{load_mappings, report, run_batch, Converter, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "monarch-migrate")]
#[command(about = "Convert Personal Capital CSV exports to Monarch Money import files")]
struct Args {
    /// Directory containing Personal Capital CSV exports
    #[arg(long, default_value = "input")]
    input_dir: PathBuf,

    /// Directory the converted *-monarch.csv files are written to
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Category mapping configuration (TOML)
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mappings = load_mappings(&args.config);
    report::write_mapping_source(&mut out, &mappings.source)?;

    let converter = Converter::new(mappings.translator);
    let summary = run_batch(
        &args.input_dir,
        &args.output_dir,
        &converter,
        report::progress(&mut out),
    )?;

    if summary.files_found() == 0 {
        report::write_no_sources(&mut out, &args.input_dir)?;
        return Ok(());
    }

    report::write_summary(&mut out, &summary)?;
    out.flush()?;
    Ok(())
}
