//! Expands a binary log file into text on stdout.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use deferlog::Inflater;

#[derive(Parser)]
#[command(name = "inflate", about = "Expand a deferlog binary stream into readable text")]
struct Args {
    /// Input file containing the binary log stream
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let input = File::open(&args.file)
        .with_context(|| format!("cannot open {}", args.file.display()))?;

    let stdout = io::stdout().lock();
    Inflater::new(input, stdout)
        .inflate()
        .with_context(|| format!("failed to inflate {}", args.file.display()))?;

    Ok(())
}
