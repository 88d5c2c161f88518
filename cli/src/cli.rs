use std::path::PathBuf;

/// Department routing for pothole and waste reports
#[derive(clap::Parser, Debug)]
#[command(name = "civic-router", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reasoner configuration file (TOML); defaults apply when omitted
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Route a department score map (JSON object of name -> score)
    Route(InputArgs),

    /// Score and route a detection record `{"type": .., "params": {"primary": {..}}}`
    Reason(InputArgs),

    /// Measure raw detector output, then score, route and report
    Process(ProcessArgs),

    /// Print the routing graph and its propagation matrix
    Graph,

    /// Write seeded scorer parameters to a file
    Params(ParamsArgs),
}

#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Input JSON file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum FrameKind { Pothole, Waste, Auto }

#[derive(clap::Args, Debug)]
pub struct ProcessArgs {
    /// Raw frame JSON; with `--kind auto`, an object `{"pothole": frame, "waste": frame}`
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Which detector produced the frame
    #[arg(short, long, value_enum, default_value_t = FrameKind::Auto)]
    pub kind: FrameKind,
}

#[derive(clap::Args, Debug)]
pub struct ParamsArgs {
    /// Output parameter file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Seed override (defaults to the configured seed)
    #[arg(long)]
    pub seed: Option<u64>,
}
