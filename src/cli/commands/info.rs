//! Info command implementation

use crate::cli::commands::open_store;
use crate::cli::context::CliContext;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the info command
pub fn execute(file: PathBuf, json: bool) -> Result<()> {
    let store = open_store(&file)?;
    let metadata = store.metadata();

    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    println!("{}", "File Information".green().bold());
    println!("{}", "═".repeat(50).green());
    println!("{}: {}", "Filename".bold(), metadata.filename);
    println!("{}: {}", "Parts".bold(), metadata.parts);
    println!("{}: {} bytes", "Chunk Size".bold(), metadata.chunk_size);
    println!("{}: {}", "Root".bold(), metadata.root.as_str().cyan());

    if CliContext::is_verbose() {
        let tree = store.tree();
        println!();
        println!("{}", "Tree Details:".bold());
        println!("  • Height: {}", tree.height());
        println!("  • Nodes: {}", tree.node_count());
        let total: usize = store.chunks().iter().map(|c| c.len()).sum();
        println!("  • Total Size: {} bytes", total);
    }

    Ok(())
}
