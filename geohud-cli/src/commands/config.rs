//! Configuration management CLI commands.
//!
//! Provides `config path`, `config list` and `config init`.

use clap::Subcommand;
use geohud::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// List the effective configuration settings
    List,

    /// Write a commented default configuration file if none exists
    Init,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::List => run_list(),
        ConfigCommands::Init => run_init(),
    }
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_list() -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    println!("Configuration Settings");
    println!("======================");
    for (section, entries) in settings_table(&config) {
        println!();
        println!("[{}]", section);
        for (key, value) in entries {
            if value.is_empty() {
                println!("  {} = (not set)", key);
            } else {
                println!("  {} = {}", key, value);
            }
        }
    }

    Ok(())
}

fn run_init() -> Result<(), CliError> {
    let existed = config_file_path().exists();
    let path = ConfigFile::ensure_exists()?;
    if existed {
        println!("Configuration already exists: {}", path.display());
    } else {
        println!("Created default configuration: {}", path.display());
    }
    Ok(())
}

/// Flattens the config into `(section, [(key, value)])` for display.
///
/// The API key is masked.
fn settings_table(config: &ConfigFile) -> Vec<(&'static str, Vec<(&'static str, String)>)> {
    let masked_key = config
        .geocoder
        .api_key
        .as_deref()
        .map(mask_secret)
        .unwrap_or_default();

    vec![
        (
            "geocoder",
            vec![
                ("provider", config.geocoder.provider.as_str().to_string()),
                ("api_key", masked_key),
                (
                    "base_url",
                    config.geocoder.base_url.clone().unwrap_or_default(),
                ),
                ("language", config.geocoder.language.clone()),
            ],
        ),
        ("metadata", vec![("url", config.metadata.url.clone())]),
        (
            "map",
            vec![
                ("backend", config.map.backend.to_string()),
                ("zoom", config.map.zoom.to_string()),
                ("width", config.map.width.to_string()),
                ("height", config.map.height.to_string()),
            ],
        ),
        (
            "tracker",
            vec![
                ("policy", config.tracker.policy.to_string()),
                ("epsilon", config.tracker.epsilon.to_string()),
            ],
        ),
        (
            "cache",
            vec![("grid_precision", config.cache.grid_precision.to_string())],
        ),
        (
            "network",
            vec![
                ("timeout", config.network.timeout.to_string()),
                ("user_agent", config.network.user_agent.clone()),
            ],
        ),
        (
            "logging",
            vec![("file", config.logging.file.display().to_string())],
        ),
    ]
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
