use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use ramsight_core::ExtractionMode;
use ramsight_games::GameTable;
use tracing::info;

use crate::{
    schema::output::{DecodedFrames, DecodedTrace},
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct DecodeArg {
    /// Path to the RAM trace JSON file
    trace: PathBuf,
    /// Game identifier (see `games`)
    #[arg(long)]
    game: String,
    /// Extraction mode: `revised` (objects) or `raw` (RAM fields)
    #[arg(long, default_value_t = ExtractionMode::Revised)]
    mode: ExtractionMode,
    /// Also extract HUD elements (score, lives, meters)
    #[arg(long)]
    hud: bool,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DecodeArg) -> anyhow::Result<()> {
    let table = GameTable::builtin();
    let trace = util::read_trace_file(&arg.trace)?;

    let frames = match arg.mode {
        ExtractionMode::Revised => {
            let mut session = table.session(&arg.game, arg.hud)?;
            let frames = trace
                .frames
                .iter()
                .map(|ram| session.step_objects(ram))
                .collect();
            DecodedFrames::Objects(frames)
        }
        ExtractionMode::Raw => {
            let extract = table.raw_extractor(&arg.game)?;
            DecodedFrames::Raw(trace.frames.iter().map(extract).collect())
        }
    };
    info!(
        game = %arg.game,
        mode = %arg.mode,
        frames = trace.frames.len(),
        "decoded trace"
    );

    let decoded = DecodedTrace {
        generated_at: Utc::now(),
        game: table.find(&arg.game)?.id.to_owned(),
        mode: arg.mode,
        hud: arg.hud,
        frames,
    };
    util::save_json(&decoded, arg.output.as_deref())
}
