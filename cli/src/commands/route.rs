use anyhow::Result;
use civic_router::{DepartmentScoreMap, Router};
use serde_json::Value;
use tracing::info;

use crate::commands::{load_config, print_json, read_json};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::InputArgs) -> Result<()> {
    let config = load_config(cli)?;
    let scores = DepartmentScoreMap::from_value(&read_json::<Value>(&args.input)?);

    info!("[route] {} departments from {}", scores.len(), args.input.display());
    print_json(&Router::new(config.router).route(&scores))
}
