pub mod graph;
pub mod params;
pub mod process;
pub mod reason;
pub mod route;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use civic_router::{Config, Reasoner};
use serde::{Serialize, de::DeserializeOwned};

/// Load the configuration named on the command line, or the defaults.
pub(crate) fn load_config(cli: &crate::cli::Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(Config::default()),
    }
}

pub(crate) fn build_reasoner(cli: &crate::cli::Cli) -> Result<Reasoner> {
    let config = load_config(cli)?;
    Reasoner::new(&config).context("Failed to initialise the routing reasoner")
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
