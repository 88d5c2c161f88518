use anyhow::Result;
use civic_router::RawFrame;
use serde::Deserialize;
use tracing::info;

use crate::cli::FrameKind;
use crate::commands::{build_reasoner, print_json, read_json};

/// Output of both detectors for one image.
#[derive(Deserialize)]
struct FramePair {
    #[serde(default)]
    pothole: Option<RawFrame>,
    #[serde(default)]
    waste: Option<RawFrame>,
}

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ProcessArgs) -> Result<()> {
    let reasoner = build_reasoner(cli)?;

    let report = match args.kind {
        FrameKind::Pothole => {
            let frame: RawFrame = read_json(&args.input)?;
            reasoner.report_frames(Some(&frame), None)
        }
        FrameKind::Waste => {
            let frame: RawFrame = read_json(&args.input)?;
            reasoner.report_frames(None, Some(&frame))
        }
        FrameKind::Auto => {
            let pair: FramePair = read_json(&args.input)?;
            reasoner.report_frames(pair.pothole.as_ref(), pair.waste.as_ref())
        }
    };

    info!("[process] {} -> {} ({})", report.detection_type, report.department, report.priority);
    print_json(&report)
}
