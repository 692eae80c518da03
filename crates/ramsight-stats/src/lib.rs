//! Cross-modal matching of object lists.
//!
//! Compares the objects one channel reports for a frame (the *reference*, usually a
//! vision detector) with the objects of another channel (the *candidate*, usually the
//! RAM decoder) and scores the agreement.
//!
//! # Matching Rules
//!
//! Objects are only compared with objects of the same category. Within a category:
//!
//! 1. References and candidates are paired to minimize the total center distance
//!    ([`assignment`]); the surplus of the larger side is unpaired
//! 2. Unpaired references are false negatives, unpaired candidates false positives
//! 3. A pair is a true positive when its centers are closer than
//!    [`MatchConfig::max_distance`], otherwise it counts as both a false positive and a
//!    false negative
//! 4. Every overlapping pair contributes its IOU ([`overlap`])
//!
//! Rates with a zero denominator are undefined: they are `None` in reports and left
//! out of per-category maps.
//!
//! # Modules
//!
//! - [`report`]: single-frame scoring ([`score`], [`MatchReport`])
//! - [`detection`]: detection counts and multi-frame tallies ([`DetectionTally`])
//! - [`batch`]: parallel scoring of many frames ([`score_batch`])
//! - [`descriptive`]: spread of per-frame scores
//!
//! # Example
//!
//! ```
//! use ramsight_core::{Category, GameObject, Position};
//! use ramsight_stats::score;
//!
//! let reference = [
//!     GameObject::new(Category::Tanker).with_position(Position::new(0, 0)),
//!     GameObject::new(Category::Tanker).with_position(Position::new(50, 50)),
//! ];
//! let report = score(&reference, &[]);
//!
//! assert_eq!(report.categories[&Category::Tanker].counts.false_negatives, 2);
//! assert!(report.precisions().is_empty());
//! assert_eq!(report.recalls()[&Category::Tanker], 0.0);
//! ```

pub use self::{
    batch::{FramePair, score_batch, score_batch_with_workers},
    detection::{DetectionCounts, DetectionTally, TallySummary},
    report::{CategoryReport, MatchConfig, MatchReport, score, score_with},
};

pub mod assignment;
pub mod batch;
pub mod descriptive;
pub mod detection;
pub mod overlap;
pub mod report;
