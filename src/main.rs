// Run using: cargo run --bin skein --features="cli" -- hash some_file

use skein3fish::*;

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use memmap::Mmap;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod kat;

#[derive(Debug, Parser)]
#[command(name = "skein", author, version, about = "Skein v1.3 hash and Skein-MAC", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Hash files, or stdin when no file is given.
    Hash {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Skein-MAC of files, or of stdin when no file is given.
    Mac {
        /// MAC key, hex encoded.
        #[arg(short, long)]
        key: String,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Generate a random MAC key of one block.
    Genkey {
        #[arg(short, long, default_value_t = 512)]
        state_size: usize,
        /// Write the key to this file, which must not exist yet.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Run a Skein golden KAT file.
    Kat {
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Internal state size in bits: 256, 512 or 1024.
    #[arg(short, long, default_value_t = 512)]
    state_size: usize,
    /// Digest size in bits.
    #[arg(short, long, default_value_t = 512)]
    output_bits: usize,
    files: Vec<PathBuf>,
}

fn setup_logger() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .compact(),
        )
        .with(filter)
        .init()
}

// ----------------------------------------------------------------------------
// Feeds one input and returns its digest, files are memory mapped.
fn digest_input<D: SkeinDigest + Write>(d: &mut D, path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        None => {
            io::copy(&mut io::stdin().lock(), d).context("failed to read stdin")?;
        }
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            let len = file.metadata().with_context(|| format!("failed to stat {}", path.display()))?.len();
            // an empty file cannot be mapped
            if len > 0 {
                let mmap = unsafe { Mmap::map(&file) }
                    .with_context(|| format!("failed to memory map {}", path.display()))?;
                d.update(&mmap);
            }
        }
    }
    Ok(d.finalize())
}

fn digest_inputs<D: SkeinDigest + Write>(d: &mut D, files: &[PathBuf]) -> anyhow::Result<()> {
    if files.is_empty() {
        println!("{}  -", hex::encode(digest_input(d, None)?));
    }
    for path in files {
        println!("{}  {}", hex::encode(digest_input(d, Some(path))?), path.display());
    }
    Ok(())
}

fn generate_key(state_size: usize, out: Option<&Path>) -> anyhow::Result<()> {
    let size = StateSize::from_bits(state_size)?;
    let mut key = vec![0u8; size.block_size()];
    getrandom::getrandom(&mut key).map_err(|e| anyhow!("failed to get random bytes: {}", e))?;
    let text = hex::encode(&key);
    match out {
        None => println!("{}", text),
        Some(path) => {
            let mut file = OpenOptions::new().write(true).create_new(true).open(path)
                .with_context(|| format!("failed to create key file {}", path.display()))?;
            writeln!(file, "{}", text).with_context(|| format!("failed to write {}", path.display()))?;
        }
    }
    Ok(())
}

fn run_kat(path: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let vectors = kat::parse(&text).with_context(|| format!("failed to parse {}", path.display()))?;

    let (mut processed, mut skipped) = (0, 0);
    for v in &vectors {
        if v.is_tree() {
            skipped += 1;
            continue;
        }
        let got = v.compute().with_context(|| format!("record at line {}", v.line))?;
        if got != v.result {
            bail!("Skein-{}-{} msgLen = {} bits{} (line {}) mismatch\n  expected {}\n  computed {}",
                  v.state_bits, v.output_bits, v.msg_bits, v.rest, v.line,
                  hex::encode(&v.result), hex::encode(&got));
        }
        tracing::debug!(target: LOG_TARGET, line = v.line, mac = v.is_mac(), "kat record ok");
        processed += 1;
    }
    println!("{} vectors checked, {} tree vectors skipped", processed, skipped);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    setup_logger();

    match Cli::parse().command {
        Command::Hash { input } => {
            let mut skein = new_hash(input.state_size, input.output_bits)?;
            digest_inputs(&mut skein, &input.files)
        }
        Command::Mac { key, input } => {
            let key = hex::decode(key.trim()).context("MAC key is not valid hex")?;
            let mut mac = new_mac(input.state_size, input.output_bits, &key)?;
            digest_inputs(&mut mac, &input.files)
        }
        Command::Genkey { state_size, out } => generate_key(state_size, out.as_deref()),
        Command::Kat { file } => run_kat(&file),
    }
}
