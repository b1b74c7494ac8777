//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;
use std::path::PathBuf;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "runs.repetitions")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,

    /// Operate on this file instead of the user config
    #[arg(long, short = 'c')]
    pub file: Option<PathBuf>,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    let path = match &args.file {
        Some(file) => file.clone(),
        None => Config::config_path()?,
    };

    if args.path {
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save_to(&path)?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load_from(&path)?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            let content = toml::to_string_pretty(&config)
                .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
            print!("{}", content);
        }

        // Key only: show that value
        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                return Err(Error::Config(format!(
                    "Unknown config key: {}\n\nAvailable keys:\n  {}",
                    key,
                    Config::available_keys().join("\n  ")
                )));
            }
        },

        // Key and value: set the value, refusing to save an unusable config
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.validate()?;
            config.save_to(&path)?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            return Err(Error::Config(
                "Must specify a key to set a value".to_string(),
            ));
        }
    }

    Ok(())
}
