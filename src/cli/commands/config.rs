//! Config command implementation.
//!
//! Shows the effective configuration and manages the config file.

use std::path::PathBuf;

use crate::cli::{effective_config, Cli, ConfigAction, ConfigArgs, OutputFormat};
use crate::config::{default_config_path, Config};
use crate::error::{CommentTreeError, Result};

/// Run the config command.
///
/// `path` and `init` work even when the config file is missing or broken.
pub fn run(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, &effective_config(cli)?),
        ConfigAction::Path => show_config_path(cli),
        ConfigAction::Init { force } => init_config(cli, *force),
    }
}

/// Show the configuration after file loading and command-line overrides.
fn show_config(cli: &Cli, config: &Config) -> Result<()> {
    match cli.effective_output() {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Text => {
            let text = toml::to_string_pretty(config).map_err(|e| CommentTreeError::ConfigError {
                message: e.to_string(),
            })?;
            print!("{text}");
        }
    }
    Ok(())
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}

fn show_config_path(cli: &Cli) -> Result<()> {
    let path = config_path(cli)?;
    match cli.effective_output() {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": path,
                "exists": path.exists(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist, using defaults)");
            }
        }
    }
    Ok(())
}

fn init_config(cli: &Cli, force: bool) -> Result<()> {
    let path = config_path(cli)?;
    if path.exists() && !force {
        return Err(CommentTreeError::InvalidArgument {
            name: "force".to_string(),
            reason: format!("{} already exists; pass --force to overwrite", path.display()),
        });
    }

    Config::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
