use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use bitbloom_core::{BloomFilter, FilterConfig, ZeroHashPolicy};

#[derive(Parser)]
#[command(name = "bitbloom", about = "bitbloom CLI — Bloom filter files")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create an empty filter file
    Create {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, required_unless_present = "config")]
        buckets: Option<u32>,
        #[arg(long, required_unless_present = "config")]
        hashes: Option<u8>,
        /// JSON config with bucket_count / hash_count / zero_hash_policy
        #[arg(long, conflicts_with_all = ["buckets", "hashes"])]
        config: Option<PathBuf>,
        /// Refuse --hashes 0 instead of probing a single bucket per key
        #[arg(long, default_value_t = false)]
        reject_zero_hashes: bool,
    },

    Add {
        #[arg(long)]
        file: PathBuf,
        /// Values are hex-encoded bytes
        #[arg(long, default_value_t = false)]
        hex: bool,
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Prints `maybe` or `absent`
    Test {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value_t = false)]
        hex: bool,
        /// Start of the tested sub-slice (clamped to the value)
        #[arg(long)]
        begin: Option<usize>,
        /// End of the tested sub-slice, exclusive (clamped to the value)
        #[arg(long)]
        end: Option<usize>,
        value: String,
    },

    Info {
        #[arg(long)]
        file: PathBuf,
    },

    /// Hex of the serialized filter
    Dump {
        #[arg(long)]
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn decode_value(value: &str, is_hex: bool) -> Result<Vec<u8>> {
    if is_hex {
        hex::decode(value).with_context(|| format!("bad hex value: {value}"))
    } else {
        Ok(value.as_bytes().to_vec())
    }
}

fn open_filter(file: &Path) -> Result<BloomFilter> {
    BloomFilter::open(file).with_context(|| format!("open {}", file.display()))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Create { file, buckets, hashes, config, reject_zero_hashes } => {
            let mut cfg = match config {
                Some(p) => FilterConfig::load(&p).with_context(|| format!("config {}", p.display()))?,
                None => {
                    let b = buckets.ok_or_else(|| anyhow!("--buckets is required"))?;
                    let h = hashes.ok_or_else(|| anyhow!("--hashes is required"))?;
                    FilterConfig::new(b, h)
                }
            };
            if reject_zero_hashes {
                cfg = cfg.with_zero_hash_policy(ZeroHashPolicy::Reject);
            }
            let f = cfg.build()?;
            f.save(&file)?;
            println!(
                "created: {} buckets={} hashes={} bytes={}",
                file.display(),
                f.bucket_count(),
                f.hash_count(),
                f.serialized_len()
            );
        }
        Cmd::Add { file, hex, values } => {
            let mut f = open_filter(&file)?;
            for v in &values {
                f.add(&decode_value(v, hex)?);
            }
            f.save(&file)?;
            tracing::info!(added = values.len(), "values added");
            println!("added: {}", values.len());
        }
        Cmd::Test { file, hex, begin, end, value } => {
            let f = open_filter(&file)?;
            let buf = decode_value(&value, hex)?;
            let begin = begin.unwrap_or(0);
            let end = end.unwrap_or(buf.len());
            let hit = f.contains_range(&buf, begin..end);
            println!("{}", if hit { "maybe" } else { "absent" });
        }
        Cmd::Info { file } => {
            let f = open_filter(&file)?;
            println!("buckets: {}", f.bucket_count());
            println!("hashes : {}", f.hash_count());
            println!("bytes  : {}", f.serialized_len());
            println!("set    : {}", f.bits_set());
        }
        Cmd::Dump { file } => {
            let f = open_filter(&file)?;
            println!("{}", hex::encode(f.to_bytes()));
        }
    }
    Ok(())
}
