//! Command-line interface for merkle-parts

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

pub mod commands;
pub mod context;

/// merkle-parts - verified chunk transfer with merkle inclusion proofs
#[derive(Parser)]
#[command(
    name = "merkle-parts",
    version,
    about = "Split files into fixed-size parts and prove each part against a merkle root",
    long_about = "merkle-parts builds a merkle tree over the fixed-size chunks of a file, serves individual parts together with inclusion proofs, and verifies received parts against a trusted root digest."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Chunk size in bytes (default: config core.chunk_size, then 32)
    #[arg(long, global = true, env = "MERKLE_PARTS_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Encoding of a part written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PartFormat {
    Json,
    Binary,
}

impl PartFormat {
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "json" => Some(PartFormat::Json),
            "binary" => Some(PartFormat::Binary),
            _ => None,
        }
    }

    /// Guess the encoding of stored part bytes
    pub fn detect(bytes: &[u8]) -> Self {
        let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
        if first == Some(&b'{') {
            PartFormat::Json
        } else {
            PartFormat::Binary
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show metadata for a file: name, part count, chunk size, root
    Info {
        /// File to chunk
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the root digest of a file's merkle tree
    Root {
        /// File to chunk
        file: PathBuf,
    },

    /// Produce a part (chunk data plus inclusion proof)
    Prove {
        /// File to chunk
        file: PathBuf,

        /// Part index
        #[arg(short, long)]
        index: usize,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Part encoding (default: config output.format, then json)
        #[arg(long, value_enum)]
        format: Option<PartFormat>,
    },

    /// Verify a part against its proof and, optionally, a trusted root
    Verify {
        /// Part file written by `prove`
        part: PathBuf,

        /// Trusted root digest (hex)
        #[arg(long)]
        root: Option<String>,

        /// Part count of the source; also checks the proof leads to the part's index
        #[arg(long)]
        parts: Option<usize>,

        /// Part encoding (default: detect)
        #[arg(long, value_enum)]
        format: Option<PartFormat>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Retrieve one part's raw bytes after verifying its proof
    Get {
        /// File to chunk
        file: PathBuf,

        /// Part index
        #[arg(short, long)]
        index: usize,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dump the merkle tree of a file
    Tree {
        /// File to chunk
        file: PathBuf,

        /// List digests layer by layer instead of the nested JSON dump
        #[arg(long)]
        layers: bool,
    },

    /// Get and set configuration values
    Config {
        /// Configuration key
        key: Option<String>,

        /// Value to set
        value: Option<String>,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,

        /// Unset the key
        #[arg(long)]
        unset: bool,

        /// Show configuration file location
        #[arg(long)]
        show_origin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
