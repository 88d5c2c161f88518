mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{graph, params, process, reason, route};
use tracing_subscriber::EnvFilter;

/// Send logs to stderr, keeping stdout for JSON results. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Route(args) => route::run(&cli, args),
        Commands::Reason(args) => reason::run(&cli, args),
        Commands::Process(args) => process::run(&cli, args),
        Commands::Graph => graph::run(&cli),
        Commands::Params(args) => params::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
