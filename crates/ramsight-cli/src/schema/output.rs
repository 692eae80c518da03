use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ramsight_core::{Category, ExtractionMode, GameObject, RawField};
use ramsight_stats::{
    DetectionCounts, MatchConfig, MatchReport, TallySummary, descriptive::Distribution,
};
use serde::{Deserialize, Serialize};

/// Result of the `decode` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedTrace {
    pub generated_at: DateTime<Utc>,
    pub game: String,
    pub mode: ExtractionMode,
    pub hud: bool,
    pub frames: DecodedFrames,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecodedFrames {
    Objects(Vec<Vec<GameObject>>),
    Raw(Vec<Vec<RawField>>),
}

/// Result of the `compare` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub game: String,
    pub hud: bool,
    pub config: MatchConfig,
    pub frames: usize,
    pub summary: TallySummary,
    pub counts: BTreeMap<Category, DetectionCounts>,
    pub precision: BTreeMap<Category, f64>,
    pub recall: BTreeMap<Category, f64>,
    pub f_score: BTreeMap<Category, f64>,
    pub iou: BTreeMap<Category, f64>,
    /// Spread of the per-frame F-scores
    pub f_score_distribution: Option<Distribution>,
    /// Per-frame reports, present when requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frame_reports: Vec<MatchReport>,
}
