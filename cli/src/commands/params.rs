use anyhow::Result;
use civic_router::{Department, ScorerParams};
use tracing::info;

use crate::commands::load_config;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ParamsArgs) -> Result<()> {
    let config = load_config(cli)?;
    let seed = args.seed.unwrap_or(config.scorer.seed);

    let params = ScorerParams::seeded(config.features.width, config.scorer.hidden_dim, Department::COUNT, seed);
    params.save(&args.output)?;

    info!("[params] wrote seed {seed} parameters ({}x{}x{}) to {}",
        params.input_dim(), config.scorer.hidden_dim, params.output_dim(), args.output.display());
    Ok(())
}
