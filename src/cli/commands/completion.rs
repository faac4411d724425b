use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

const BIN_NAME: &str = "merkle-parts";

/// Generate shell completion scripts
///
/// The script goes to stdout; installation hints go to stderr so the output
/// can be redirected straight into a completions file.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());

    eprintln!("\n{}", "Installation Instructions:".bold());
    match shell {
        Shell::Bash => {
            eprintln!("  Add the following to your ~/.bashrc:");
            eprintln!("  {}", "eval \"$(merkle-parts completion bash)\"".cyan());
        },
        Shell::Zsh => {
            eprintln!("  Save the script in your fpath:");
            eprintln!(
                "  {}",
                "merkle-parts completion zsh > ~/.local/share/zsh/site-functions/_merkle-parts"
                    .cyan()
            );
        },
        Shell::Fish => {
            eprintln!(
                "  {}",
                "merkle-parts completion fish > ~/.config/fish/completions/merkle-parts.fish"
                    .cyan()
            );
        },
        Shell::PowerShell => {
            eprintln!(
                "  {}",
                "Invoke-Expression (& merkle-parts completion powershell)".cyan()
            );
        },
        _ => {
            eprintln!(
                "  Please refer to your shell's documentation for installing completion scripts."
            );
        },
    }

    Ok(())
}
