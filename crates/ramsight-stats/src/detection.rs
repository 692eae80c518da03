//! Detection counts and the precision/recall/F-score derived from them.

use std::collections::BTreeMap;

use ramsight_core::{Category, GameObject};
use serde::{Deserialize, Serialize};

use crate::{
    assignment::assign,
    descriptive::Distribution,
    overlap::IouAccumulator,
    report::MatchReport,
};

/// True-positive, false-positive and false-negative counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionCounts {
    pub true_positives: u32,
    pub false_positives: u32,
    pub false_negatives: u32,
}

impl DetectionCounts {
    /// Counts the matches between references and candidates of a single category.
    ///
    /// Unpaired objects count as false negatives (references) or false positives
    /// (candidates). A pair farther apart than `max_distance` counts as both.
    #[must_use]
    pub fn classify(
        reference: &[&GameObject],
        candidate: &[&GameObject],
        max_distance: f64,
    ) -> Self {
        let mut counts = Self {
            true_positives: 0,
            false_positives: saturating_count(candidate.len().saturating_sub(reference.len())),
            false_negatives: saturating_count(reference.len().saturating_sub(candidate.len())),
        };
        for pair in assign(reference, candidate) {
            if pair.distance < max_distance {
                counts.true_positives += 1;
            } else {
                counts.false_positives += 1;
                counts.false_negatives += 1;
            }
        }
        counts
    }

    /// `TP / (TP + FP)`, `None` without any candidate.
    #[must_use]
    pub fn precision(&self) -> Option<f64> {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// `TP / (TP + FN)`, `None` without any reference.
    #[must_use]
    pub fn recall(&self) -> Option<f64> {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall, `None` if either is undefined.
    #[must_use]
    pub fn f_score(&self) -> Option<f64> {
        let precision = self.precision()?;
        let recall = self.recall()?;
        if precision + recall == 0.0 {
            return Some(0.0);
        }
        Some(2.0 * precision * recall / (precision + recall))
    }

    pub fn add(&mut self, other: &Self) {
        self.true_positives += other.true_positives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
    }
}

fn ratio(numerator: u32, denominator: u32) -> Option<f64> {
    (denominator > 0).then(|| f64::from(numerator) / f64::from(denominator))
}

fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Builds a per-category map from `f`, leaving out categories where it is undefined.
pub(crate) fn per_category<F>(
    counts: &BTreeMap<Category, DetectionCounts>,
    f: F,
) -> BTreeMap<Category, f64>
where
    F: Fn(&DetectionCounts) -> Option<f64>,
{
    counts
        .iter()
        .filter_map(|(&category, counts)| Some((category, f(counts)?)))
        .collect()
}

/// Sums all category counts.
pub(crate) fn pooled<'a, I>(counts: I) -> DetectionCounts
where
    I: IntoIterator<Item = &'a DetectionCounts>,
{
    counts
        .into_iter()
        .fold(DetectionCounts::default(), |mut acc, counts| {
            acc.add(counts);
            acc
        })
}

/// Overall scores of a [`DetectionTally`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TallySummary {
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f_score: Option<f64>,
    pub iou: Option<f64>,
}

/// Detection counts accumulated over many frames.
///
/// # Example
///
/// ```
/// use ramsight_core::{Category, GameObject, Position};
/// use ramsight_stats::{DetectionTally, score};
///
/// let jet = GameObject::new(Category::Jet).with_position(Position::new(10, 10));
/// let mut tally = DetectionTally::new();
/// tally.update(&score(&[jet.clone()], &[jet.clone()]));
/// tally.update(&score(&[jet], &[]));
///
/// let summary = tally.summary();
/// assert_eq!(summary.precision, Some(1.0));
/// assert_eq!(summary.recall, Some(0.5));
/// assert_eq!(tally.frames(), 2);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionTally {
    frames: usize,
    counts: BTreeMap<Category, DetectionCounts>,
    iou: BTreeMap<Category, IouAccumulator>,
    frame_f_scores: Vec<f64>,
}

impl DetectionTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the counts and overlaps of one frame.
    pub fn update(&mut self, report: &MatchReport) {
        self.frames += 1;
        for (&category, counts) in report.counts() {
            self.counts.entry(category).or_default().add(counts);
        }
        for (&category, iou) in report.iou_accumulators() {
            self.iou.entry(category).or_default().merge(iou);
        }
        if let Some(f_score) = report.f_score {
            self.frame_f_scores.push(f_score);
        }
    }

    /// Folds another tally into this one. Frames of `other` come after the frames of `self`.
    pub fn merge(&mut self, other: Self) {
        self.frames += other.frames;
        for (category, counts) in other.counts {
            self.counts.entry(category).or_default().add(&counts);
        }
        for (category, iou) in other.iou {
            self.iou.entry(category).or_default().merge(&iou);
        }
        self.frame_f_scores.extend(other.frame_f_scores);
    }

    /// Number of frames added.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }

    #[must_use]
    pub fn counts(&self) -> &BTreeMap<Category, DetectionCounts> {
        &self.counts
    }

    #[must_use]
    pub fn precisions(&self) -> BTreeMap<Category, f64> {
        per_category(&self.counts, DetectionCounts::precision)
    }

    #[must_use]
    pub fn recalls(&self) -> BTreeMap<Category, f64> {
        per_category(&self.counts, DetectionCounts::recall)
    }

    #[must_use]
    pub fn f_scores(&self) -> BTreeMap<Category, f64> {
        per_category(&self.counts, DetectionCounts::f_score)
    }

    /// Mean IOU of the overlapping pairs of each category.
    #[must_use]
    pub fn ious(&self) -> BTreeMap<Category, f64> {
        self.iou
            .iter()
            .filter_map(|(&category, iou)| Some((category, iou.mean()?)))
            .collect()
    }

    /// Scores over the pooled counts of every category and frame.
    #[must_use]
    pub fn summary(&self) -> TallySummary {
        let counts = pooled(self.counts.values());
        let iou = self
            .iou
            .values()
            .fold(IouAccumulator::default(), |mut acc, iou| {
                acc.merge(iou);
                acc
            });
        TallySummary {
            precision: counts.precision(),
            recall: counts.recall(),
            f_score: counts.f_score(),
            iou: iou.mean(),
        }
    }

    /// Spread of the per-frame F-scores, over frames where it is defined.
    #[must_use]
    pub fn f_score_distribution(&self) -> Option<Distribution> {
        Distribution::new(self.frame_f_scores.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use ramsight_core::{Position, Size};

    use super::*;

    fn object(x: i32, y: i32) -> GameObject {
        GameObject::new(Category::Tanker)
            .with_position(Position::new(x, y))
            .with_size(Size::new(16, 8))
    }

    fn classify(reference: &[GameObject], candidate: &[GameObject]) -> DetectionCounts {
        let reference: Vec<_> = reference.iter().collect();
        let candidate: Vec<_> = candidate.iter().collect();
        DetectionCounts::classify(&reference, &candidate, 5.0)
    }

    #[test]
    fn test_close_pair_is_true_positive() {
        let counts = classify(&[object(10, 10)], &[object(11, 11)]);
        assert_eq!(
            counts,
            DetectionCounts {
                true_positives: 1,
                false_positives: 0,
                false_negatives: 0
            }
        );
        assert_eq!(counts.precision(), Some(1.0));
        assert_eq!(counts.recall(), Some(1.0));
        assert_eq!(counts.f_score(), Some(1.0));
    }

    #[test]
    fn test_distant_pair_counts_both_ways() {
        let counts = classify(&[object(10, 10)], &[object(10, 15)]);
        assert_eq!(counts.true_positives, 0);
        assert_eq!(counts.false_positives, 1);
        assert_eq!(counts.false_negatives, 1);
        assert_eq!(counts.f_score(), Some(0.0));
    }

    #[test]
    fn test_missing_candidates() {
        let counts = classify(&[object(0, 0), object(50, 50)], &[]);
        assert_eq!(counts.false_negatives, 2);
        assert_eq!(counts.false_positives, 0);
        assert_eq!(counts.precision(), None);
        assert_eq!(counts.recall(), Some(0.0));
        assert_eq!(counts.f_score(), None);
    }

    #[test]
    fn test_surplus_candidates() {
        let counts = classify(
            &[object(0, 0), object(40, 0)],
            &[object(41, 0), object(1, 0), object(80, 0)],
        );
        assert_eq!(counts.true_positives, 2);
        assert_eq!(counts.false_positives, 1);
        assert_eq!(counts.false_negatives, 0);
    }

    #[test]
    fn test_tally_merge_keeps_frame_order() {
        let mut first = DetectionTally::new();
        first.frames = 1;
        first.frame_f_scores.push(1.0);
        let mut second = DetectionTally::new();
        second.frames = 2;
        second.frame_f_scores.extend([0.5, 0.0]);

        first.merge(second);
        assert_eq!(first.frames(), 3);
        assert_eq!(first.frame_f_scores, [1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_empty_tally() {
        let tally = DetectionTally::new();
        assert!(tally.precisions().is_empty());
        assert!(tally.f_score_distribution().is_none());
        let summary = tally.summary();
        assert_eq!(summary.precision, None);
        assert_eq!(summary.iou, None);
    }
}
