/*
cargo run --release --bin collect_inputs

cargo run --release --bin collect_inputs -- \
    --count 100 \
    --input-dir tools/in \
    --out-file input.json
*/

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use std::fs::{self, create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// CLI parameters; defaults mirror the batch-runner layout (tools/in -> input.json)
#[derive(Parser, Debug)]
#[command(version, about = "Pack numbered testcase files into one JSON array")]
struct Cli {
    // How many testcases to pack (indices 0..count)
    #[arg(long, default_value_t = 100)]
    count: usize,

    // Directory holding the numbered testcase files (0000.txt, 0001.txt, ...)
    #[arg(long, default_value = "tools/in")]
    input_dir: PathBuf,

    // Output JSON file, created or overwritten
    #[arg(long = "out-file", value_name = "PATH", default_value = "input.json")]
    out_file: PathBuf,

    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

// One testcase as the batch runner consumes it
#[derive(Debug, Serialize)]
struct Record {
    seed: usize,
    input: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // logging setup
    create_dir_all(&cli.log_dir)?;
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = cli.log_dir.join(format!("collect_inputs_{ts}.log"));
    WriteLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        File::create(&log_path)?,
    )?;
    info!(
        "Packing {} testcases from {:?} into {:?}",
        cli.count, cli.input_dir, cli.out_file
    );

    run(cli.count, &cli.input_dir, &cli.out_file)?;
    info!("Done");

    println!("\n=== Pack summary ===");
    println!("Testcases packed : {}", cli.count);
    println!("Output JSON      : {:?}", cli.out_file);
    println!("Log file         : {:?}", log_path);

    Ok(())
}

// Read all testcases, then write the array in one go. The output file is not
// touched until every input file has been read successfully.
fn run(count: usize, input_dir: &Path, out_file: &Path) -> Result<()> {
    let records = collect(count, input_dir)?;
    write_pretty(out_file, &records)?;
    info!("Wrote {} records → {:?}", records.len(), out_file);
    Ok(())
}

fn collect(count: usize, input_dir: &Path) -> Result<Vec<Record>> {
    let bar = ProgressBar::new(count as u64);
    bar.set_style(ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
    )?);

    let mut records = Vec::with_capacity(count);
    for seed in 0..count {
        let path = input_dir.join(format!("{seed:04}.txt"));
        let input = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        records.push(Record { seed, input });
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(records)
}

// 4-space indent, matching what the downstream runner already expects
fn write_pretty(path: &Path, records: &[Record]) -> Result<()> {
    let outfile = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut ser = serde_json::Serializer::with_formatter(
        BufWriter::new(outfile),
        PrettyFormatter::with_indent(b"    "),
    );
    records
        .serialize(&mut ser)
        .with_context(|| format!("writing {}", path.display()))?;
    // flush explicitly: a Drop-time flush would discard the error
    ser.into_inner()
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
