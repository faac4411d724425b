//! Configuration command implementation

use crate::config::{ConfigKey, ConfigValue, GlobalConfig};
use anyhow::{anyhow, Result};
use colored::Colorize;
use serde_json::json;

/// Execute the config command
pub fn execute(
    key: Option<String>,
    value: Option<String>,
    list: bool,
    unset: bool,
    show_origin: bool,
    json: bool,
) -> Result<()> {
    let mut config = GlobalConfig::load()?;

    if show_origin {
        let config_path = GlobalConfig::get_config_path()?;
        if json {
            println!(
                "{}",
                json!({
                    "config_file": config_path.display().to_string(),
                    "exists": config_path.exists()
                })
            );
        } else {
            println!(
                "{}: {}",
                "Configuration file".bold(),
                config_path.display().to_string().cyan()
            );
            if config_path.exists() {
                println!("{}: {}", "Status".bold(), "exists".green());
            } else {
                println!("{}: {}", "Status".bold(), "not created yet".yellow());
            }
        }
        return Ok(());
    }

    if list {
        return list_configuration(&config, json);
    }

    let Some(key_str) = key else {
        show_usage(json);
        return Ok(());
    };

    let config_key = ConfigKey::from_str(&key_str)
        .ok_or_else(|| anyhow!("Invalid configuration key: {}", key_str))?;

    if unset {
        config.unset(&config_key);
        config.save()?;

        if json {
            println!(
                "{}",
                json!({"action": "unset", "key": key_str, "status": "success"})
            );
        } else {
            println!("{} {}", "✓".green(), format!("Unset {}", key_str).bold());
        }
    } else if let Some(value_str) = value {
        config.set(config_key, ConfigValue::parse(&value_str))?;
        config.save()?;

        if json {
            println!(
                "{}",
                json!({"action": "set", "key": key_str, "value": value_str, "status": "success"})
            );
        } else {
            println!("{} {} = {}", "✓".green(), key_str.bold(), value_str.cyan());
        }
    } else {
        match config.get(&config_key) {
            Some(value) if json => {
                println!("{}", json!({"key": key_str, "value": value.to_string()}));
            },
            Some(value) => println!("{}", value),
            None if json => {
                println!(
                    "{}",
                    json!({"key": key_str, "value": null, "error": "not set"})
                );
            },
            None => {
                eprintln!(
                    "{}",
                    format!("Configuration key '{}' is not set", key_str).yellow()
                );
                return Err(anyhow!("Configuration key not set"));
            },
        }
    }

    Ok(())
}

/// List all configuration values
fn list_configuration(config: &GlobalConfig, json: bool) -> Result<()> {
    let entries = config.list();

    if json {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else if entries.is_empty() {
        println!("{}", "No configuration values set".yellow());
        println!();
        println!("{}", "To set configuration:".bold());
        println!("  {}", "merkle-parts config core.chunk_size 1024".cyan());
    } else {
        println!("{}", "Global Configuration".green().bold());
        println!("{}", "═".repeat(40));
        println!();
        for (key, value) in entries {
            println!("{} = {}", key.bold(), value.cyan());
        }
    }

    Ok(())
}

fn show_usage(json: bool) {
    if json {
        println!(
            "{}",
            json!({
                "error": "No configuration key specified",
                "usage": "merkle-parts config <key> [value] or --list"
            })
        );
        return;
    }

    println!("{}", "Configuration Management".green().bold());
    println!("{}", "═".repeat(40));
    println!();
    println!("{}", "Usage:".bold());
    println!("  {} Get value", "merkle-parts config <key>".cyan());
    println!("  {} Set value", "merkle-parts config <key> <value>".cyan());
    println!("  {} List all", "merkle-parts config --list".cyan());
    println!("  {} Unset value", "merkle-parts config --unset <key>".cyan());
    println!();
    println!("{}", "Keys:".bold());
    for key in ConfigKey::ALL {
        println!("  {} {}", key.to_str().green(), key.description());
    }
}
