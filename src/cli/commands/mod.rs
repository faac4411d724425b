//! CLI command implementations

pub mod completion;
pub mod config;
pub mod get;
pub mod info;
pub mod prove;
pub mod root;
pub mod tree;
pub mod verify;

// Common utilities for commands
use crate::cli::context::CliContext;
use crate::config::GlobalConfig;
use crate::core::Sha256Hasher;
use crate::proofs::TreeBuilder;
use crate::storage::{ChunkConfig, PartStore};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Chunk configuration from the command line, falling back to the config file
pub fn resolve_chunk_config(config: &GlobalConfig) -> Result<ChunkConfig> {
    let chunk_size = CliContext::chunk_size().unwrap_or_else(|| config.chunk_size());
    Ok(ChunkConfig::new(chunk_size)?)
}

/// Chunk a file and build its tree with the effective settings
pub fn open_store(file: &Path) -> Result<PartStore> {
    let config = GlobalConfig::load()?;
    let chunk_config = resolve_chunk_config(&config)?;
    let builder =
        TreeBuilder::new(Sha256Hasher).with_parallel_threshold(config.parallel_threshold());

    PartStore::open_with(file, chunk_config, &builder)
        .with_context(|| format!("Failed to build merkle tree for {}", file.display()))
}

/// Write bytes to a file, or to stdout when no path is given
pub fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        },
    }
}
