//! Prove command implementation

use crate::cli::commands::{open_store, write_output};
use crate::cli::context::CliContext;
use crate::cli::PartFormat;
use crate::config::GlobalConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Execute the prove command
pub fn execute(
    file: PathBuf,
    index: usize,
    output: Option<PathBuf>,
    format: Option<PartFormat>,
) -> Result<()> {
    let config = GlobalConfig::load()?;
    let format = format
        .or_else(|| PartFormat::from_config(config.output_format()))
        .unwrap_or(PartFormat::Json);

    let store = open_store(&file)?;
    let part = store
        .get_part(index)
        .with_context(|| format!("Cannot produce part {} of {}", index, file.display()))?;

    let bytes = match format {
        PartFormat::Json => {
            let mut text = part.to_json()?;
            text.push('\n');
            text.into_bytes()
        },
        PartFormat::Binary => part.to_bytes()?,
    };
    write_output(output.as_deref(), &bytes)?;

    if let Some(path) = &output {
        if !CliContext::is_quiet() {
            eprintln!(
                "{} Part {} ({} bytes, {} proof steps) written to {}",
                "✓".green(),
                index,
                part.data.len(),
                part.proof.len(),
                path.display().to_string().cyan()
            );
            eprintln!("  {}: {}", "Root".bold(), part.proof.expected_root);
        }
    }

    Ok(())
}
