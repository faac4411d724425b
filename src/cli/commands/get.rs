//! Get command implementation

use crate::cli::commands::{open_store, write_output};
use crate::cli::context::CliContext;
use crate::core::Sha256Hasher;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Execute the get command
pub fn execute(file: PathBuf, index: usize, output: Option<PathBuf>) -> Result<()> {
    let store = open_store(&file)?;
    let part = store
        .get_part(index)
        .with_context(|| format!("Cannot retrieve part {} of {}", index, file.display()))?;

    if !part.verify(&Sha256Hasher, store.root()) {
        return Err(anyhow!("Part {} does not verify against root {}", index, store.root()));
    }

    write_output(output.as_deref(), &part.data)?;

    if let Some(path) = &output {
        if !CliContext::is_quiet() {
            eprintln!(
                "{} Part {} verified and written to {}",
                "✓".green(),
                index,
                path.display().to_string().cyan()
            );
        }
    }

    Ok(())
}
