//! Configuration management CLI commands.
//!
//! Provides `config path`, `config list`, `config init`, `config get` and
//! `config set` for viewing and modifying settings from the command line.

use clap::Subcommand;
use tilecart::config::{ConfigFile, ConfigKey};

use super::GlobalArgs;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// List all configuration settings
    List,

    /// Create a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., grid.gap)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., grid.gap)
        key: String,

        /// Value to set
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

/// Run a config subcommand.
pub fn run(global: &GlobalArgs, command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(global),
        ConfigCommands::List => run_list(global),
        ConfigCommands::Init { force } => run_init(global, force),
        ConfigCommands::Get { key } => run_get(global, &key),
        ConfigCommands::Set { key, value } => run_set(global, &key, &value),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'tilecart config list' to see available keys.",
            key
        ))
    })
}

/// Show the configuration file path.
fn run_path(global: &GlobalArgs) -> Result<(), CliError> {
    println!("{}", global.config_path().display());
    Ok(())
}

/// List all configuration settings.
fn run_list(global: &GlobalArgs) -> Result<(), CliError> {
    let config = global.load_config()?;

    println!("Configuration Settings");
    println!("======================");
    println!();

    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        if section != current_section {
            if !current_section.is_empty() {
                println!();
            }
            println!("[{}]", section);
            current_section = section;
        }

        println!("  {} = {}", key.key_name(), key.get(&config));
    }

    Ok(())
}

/// Write a default configuration file.
fn run_init(global: &GlobalArgs, force: bool) -> Result<(), CliError> {
    let path = global.config_path();

    if force {
        ConfigFile::default().save_to(&path)?;
        println!("Wrote default configuration to {}", path.display());
    } else if ConfigFile::ensure_exists_at(&path)? {
        println!("Created {}", path.display());
    } else {
        println!("Configuration already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults.");
    }

    Ok(())
}

/// Get a configuration value.
fn run_get(global: &GlobalArgs, key: &str) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let config = global.load_config()?;
    println!("{}", config_key.get(&config));
    Ok(())
}

/// Set a configuration value.
fn run_set(global: &GlobalArgs, key: &str, value: &str) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let path = global.config_path();

    let mut config = global.load_config()?;
    config_key
        .set(&mut config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    config.save_to(&path)?;

    println!("Set {} = {}", config_key.name(), config_key.get(&config));

    Ok(())
}
