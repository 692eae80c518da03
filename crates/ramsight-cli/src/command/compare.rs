use std::path::PathBuf;

use anyhow::bail;
use chrono::Utc;
use clap::Args;
use ramsight_games::GameTable;
use ramsight_stats::{DetectionTally, FramePair, MatchConfig, score_batch, score_with};
use tracing::{debug, info};

use crate::{
    schema::{output::ComparisonReport, session::RecordedSession},
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct CompareArg {
    /// Path to the recorded session JSON file (RAM and vision detections per frame)
    session: PathBuf,
    /// Game identifier (see `games`)
    #[arg(long)]
    game: String,
    /// Include HUD elements in the comparison
    #[arg(long)]
    hud: bool,
    /// Pairs whose centers are at least this far apart do not match
    #[arg(long, default_value_t = MatchConfig::DEFAULT_MAX_DISTANCE)]
    max_distance: f64,
    /// Keep the report of every frame in the JSON output
    #[arg(long)]
    per_frame: bool,
    /// Output file path for the JSON report (table only if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    if !(arg.max_distance.is_finite() && arg.max_distance > 0.0) {
        bail!(
            "--max-distance must be a positive number, got {}",
            arg.max_distance
        );
    }
    let table = GameTable::builtin();
    let game = table.find(&arg.game)?.id;
    let session = util::read_session_file(&arg.session)?;
    let config = MatchConfig {
        max_distance: arg.max_distance,
    };

    let frames = pair_frames(&table, game, arg.hud, &session)?;
    info!(game, frames = frames.len(), "decoded session");

    let mut frame_reports = vec![];
    let tally = if arg.per_frame {
        let mut tally = DetectionTally::new();
        for (i, frame) in frames.iter().enumerate() {
            let report = score_with(&frame.reference, &frame.candidate, &config);
            debug!(frame = i, f_score = ?report.f_score, "scored frame");
            tally.update(&report);
            frame_reports.push(report);
        }
        tally
    } else {
        score_batch(&frames, &config)
    };

    print_tally(&tally);

    if let Some(path) = &arg.output {
        let report = ComparisonReport {
            generated_at: Utc::now(),
            game: game.to_owned(),
            hud: arg.hud,
            config,
            frames: tally.frames(),
            summary: tally.summary(),
            counts: tally.counts().clone(),
            precision: tally.precisions(),
            recall: tally.recalls(),
            f_score: tally.f_scores(),
            iou: tally.ious(),
            f_score_distribution: tally.f_score_distribution(),
            frame_reports,
        };
        util::save_json(&report, Some(path.as_path()))?;
        info!(path = %path.display(), "saved comparison report");
    }
    Ok(())
}

/// Decodes the RAM of every frame and pairs it with the vision detections.
///
/// Vision is the reference, the RAM decoder the candidate.
fn pair_frames(
    table: &GameTable,
    game: &str,
    hud: bool,
    session: &RecordedSession,
) -> anyhow::Result<Vec<FramePair>> {
    let mut extraction = table.session(game, hud)?;
    let frames = session
        .frames
        .iter()
        .map(|frame| FramePair {
            reference: frame
                .vision
                .iter()
                .filter(|object| hud || !object.is_hud())
                .cloned()
                .collect(),
            candidate: extraction.step_objects(&frame.ram),
        })
        .collect();
    Ok(frames)
}

fn print_tally(tally: &DetectionTally) {
    let precisions = tally.precisions();
    let recalls = tally.recalls();
    let f_scores = tally.f_scores();
    let ious = tally.ious();

    println!("Frames: {}", tally.frames());
    println!();
    println!(
        "  {:<14} {:>6} {:>6} {:>6} {:>10} {:>10} {:>10} {:>10}",
        "Category", "TP", "FP", "FN", "Precision", "Recall", "F-score", "IOU"
    );
    println!("  {}", "-".repeat(80));
    for (category, counts) in tally.counts() {
        println!(
            "  {:<14} {:>6} {:>6} {:>6} {:>10} {:>10} {:>10} {:>10}",
            category.to_string(),
            counts.true_positives,
            counts.false_positives,
            counts.false_negatives,
            util::format_rate(precisions.get(category).copied()),
            util::format_rate(recalls.get(category).copied()),
            util::format_rate(f_scores.get(category).copied()),
            util::format_rate(ious.get(category).copied()),
        );
    }
    println!("  {}", "-".repeat(80));

    let summary = tally.summary();
    println!(
        "  {:<14} {:>6} {:>6} {:>6} {:>10} {:>10} {:>10} {:>10}",
        "Overall",
        "",
        "",
        "",
        util::format_rate(summary.precision),
        util::format_rate(summary.recall),
        util::format_rate(summary.f_score),
        util::format_rate(summary.iou),
    );

    if let Some(dist) = tally.f_score_distribution() {
        println!();
        println!(
            "Per-frame F-score: min {:.3}, median {:.3}, mean {:.3}, max {:.3}",
            dist.min, dist.median, dist.mean, dist.max
        );
    }
}
