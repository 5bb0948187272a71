//! smaz CLI - short string compression tool
//!
//!   smaz compress "some text"        → compressed bytes on stdout
//!   smaz c -f notes.txt -o notes.sz  → compress a file
//!   smaz d -f notes.sz               → decompress a file to stdout
//!   cat notes.sz | smaz d            → decompress stdin to stdout

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Compress or decompress short strings with the Smaz codebook.
#[derive(Parser, Debug)]
#[command(name = "smaz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress the input
    #[command(visible_alias = "c")]
    Compress(IoArgs),
    /// Decompress the input
    #[command(visible_alias = "d")]
    Decompress(IoArgs),
}

#[derive(Args, Debug)]
struct IoArgs {
    /// Literal input (reads standard input if neither this nor --file is given)
    #[arg(value_name = "INPUT", conflicts_with = "file")]
    input: Option<String>,

    /// Read input from a file
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Write output to a file instead of standard output
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

impl IoArgs {
    fn read_input(&self) -> Result<Vec<u8>> {
        if let Some(input) = &self.input {
            return Ok(input.as_bytes().to_vec());
        }
        if let Some(path) = &self.file {
            return fs::read(path).with_context(|| format!("failed to read {}", path.display()));
        }
        let mut data = Vec::new();
        io::stdin()
            .read_to_end(&mut data)
            .context("failed to read from stdin")?;
        Ok(data)
    }

    fn write_output(&self, data: &[u8]) -> Result<()> {
        match &self.output {
            Some(path) => {
                fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(data)
                    .and_then(|()| stdout.flush())
                    .context("failed to write to stdout")
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Compress(io_args) => {
            let input = io_args.read_input()?;
            let output = smaz_rs::compress(&input);
            info!(input = input.len(), output = output.len(), "compressed");
            io_args.write_output(&output)
        }
        Command::Decompress(io_args) => {
            let input = io_args.read_input()?;
            let output = smaz_rs::decompress(&input).context("failed to decompress data")?;
            info!(input = input.len(), output = output.len(), "decompressed");
            io_args.write_output(&output)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!(?cli, "starting");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("smaz: {err:#}");
            ExitCode::FAILURE
        }
    }
}
