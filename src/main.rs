//! merkle-parts CLI
//!
//! Command-line interface for chunking files, producing parts with inclusion
//! proofs and verifying them.

use anyhow::Result;
use clap::Parser;
use merkle_parts::cli::{commands, context::CliContext, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so part data and JSON on stdout stay clean
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    CliContext::set(CliContext {
        verbose: cli.verbose,
        quiet: cli.quiet,
        chunk_size: cli.chunk_size,
    });

    match cli.command {
        Commands::Info { file, json } => commands::info::execute(file, json),
        Commands::Root { file } => commands::root::execute(file),
        Commands::Prove {
            file,
            index,
            output,
            format,
        } => commands::prove::execute(file, index, output, format),
        Commands::Verify {
            part,
            root,
            parts,
            format,
            json,
        } => commands::verify::execute(part, root, parts, format, json),
        Commands::Get {
            file,
            index,
            output,
        } => commands::get::execute(file, index, output),
        Commands::Tree { file, layers } => commands::tree::execute(file, layers),
        Commands::Config {
            key,
            value,
            list,
            unset,
            show_origin,
            json,
        } => commands::config::execute(key, value, list, unset, show_origin, json),
        Commands::Completion { shell } => commands::completion::execute(shell),
    }
}
