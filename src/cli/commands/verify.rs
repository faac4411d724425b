//! Verify command implementation

use crate::cli::context::CliContext;
use crate::cli::PartFormat;
use crate::core::{Digest, HashFunction, Sha256Hasher};
use crate::proofs::replay;
use crate::storage::Part;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Execute the verify command
pub fn execute(
    part_path: PathBuf,
    root: Option<String>,
    parts: Option<usize>,
    format: Option<PartFormat>,
    json: bool,
) -> Result<()> {
    let bytes = std::fs::read(&part_path)
        .with_context(|| format!("Failed to read part file {}", part_path.display()))?;
    let format = format.unwrap_or_else(|| PartFormat::detect(&bytes));
    let part = match format {
        PartFormat::Json => Part::from_json(std::str::from_utf8(&bytes)?)?,
        PartFormat::Binary => Part::from_bytes(&bytes)?,
    };

    let trusted_root = match root {
        Some(text) => Digest::from_hex(&text).context("Invalid --root")?,
        None => part.proof.expected_root.clone(),
    };

    let leaf = Sha256Hasher.hash(&part.data);
    let computed = replay(&Sha256Hasher, &leaf, &part.proof);
    let root_matches = part.proof.expected_root == trusted_root;
    let position_matches = parts.map(|count| part.proof.fits_index(part.index, count));
    let valid = match parts {
        Some(count) => part.verify_at(&Sha256Hasher, &trusted_root, count),
        None => part.verify(&Sha256Hasher, &trusted_root),
    };

    if json {
        println!(
            "{}",
            json!({
                "index": part.index,
                "valid": valid,
                "leaf": leaf,
                "computedRoot": computed,
                "expectedRoot": part.proof.expected_root,
                "trustedRoot": trusted_root,
                "steps": part.proof.len(),
                "positionMatches": position_matches,
            })
        );
    } else if !CliContext::is_quiet() {
        if valid {
            println!("{} Part {} verified", "✓".green(), part.index);
        } else {
            println!("{} Part {} failed verification", "✗".red(), part.index);
        }
        if CliContext::is_verbose() || !valid {
            println!("  {}: {}", "Leaf".bold(), leaf);
            println!("  {}: {}", "Computed Root".bold(), computed);
            println!("  {}: {}", "Proof Root".bold(), part.proof.expected_root);
            if position_matches == Some(false) {
                println!(
                    "  {}: proof does not lead to index {}",
                    "Position".bold(),
                    part.index.to_string().yellow()
                );
            }
            if !root_matches {
                println!("  {}: {}", "Trusted Root".bold(), trusted_root.as_str().yellow());
            }
        }
    }

    if !valid {
        return Err(anyhow!("Proof verification failed for part {}", part.index));
    }
    Ok(())
}
