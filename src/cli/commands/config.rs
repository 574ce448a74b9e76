//! Configuration command implementation

use anyhow::Result;
use colored::Colorize;

use crate::config::{ConfigKey, GlobalConfig};

/// Execute the config command
pub fn execute(
    key: Option<String>,
    value: Option<String>,
    list: bool,
    unset: bool,
    show_origin: bool,
) -> Result<()> {
    if show_origin {
        let config_path = GlobalConfig::get_config_path()?;
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
        return Ok(());
    }

    let mut config = GlobalConfig::load()?;

    let Some(key_str) = key else {
        if !list {
            println!("Usage: dfts config <key> [value] | --list | --unset <key>");
        }
        for (name, value) in config.list() {
            println!("{} = {}", name.bold(), value.cyan());
        }
        return Ok(());
    };

    let config_key = ConfigKey::parse(&key_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid configuration key: {}", key_str))?;

    if unset {
        config.unset(config_key);
        config.save()?;
        println!("{} {}", "✓".green(), format!("Unset {}", key_str).bold());
    } else if let Some(value_str) = value {
        config.set(config_key, &value_str)?;
        config.save()?;
        println!("{} {} = {}", "✓".green(), key_str.bold(), config.get(config_key).cyan());
    } else {
        println!("{}", config.get(config_key));
    }

    Ok(())
}
