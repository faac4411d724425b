//! Tree command implementation

use crate::cli::commands::open_store;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the tree command
pub fn execute(file: PathBuf, layers: bool) -> Result<()> {
    let store = open_store(&file)?;
    let tree = store.tree();

    if !layers {
        println!("{}", serde_json::to_string_pretty(&tree.to_json())?);
        return Ok(());
    }

    for layer in tree.layers().iter().rev() {
        println!(
            "{} {} ({} nodes)",
            "Height".bold(),
            layer.height,
            layer.len()
        );
        for (position, id) in layer.iter().enumerate() {
            if let Some(node) = tree.node(id) {
                println!("  #{:03} {}", position, node.digest);
            }
        }
    }

    Ok(())
}
