//! Root command implementation

use crate::cli::commands::open_store;
use anyhow::Result;
use std::path::PathBuf;

/// Execute the root command
pub fn execute(file: PathBuf) -> Result<()> {
    let store = open_store(&file)?;
    println!("{}", store.root());
    Ok(())
}
