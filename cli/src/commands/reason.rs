use anyhow::Result;
use serde_json::Value;
use tracing::info;

use crate::commands::{build_reasoner, print_json, read_json};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::InputArgs) -> Result<()> {
    let reasoner = build_reasoner(cli)?;
    let record: Value = read_json(&args.input)?;

    info!("[reason] active attributes {}", reasoner.extractor().attributes(&record));
    print_json(&reasoner.decide(&record))
}
