use std::collections::BTreeMap;

use ramsight_core::{Category, GameObject};
use serde::{Deserialize, Serialize};

use crate::{
    detection::{self, DetectionCounts},
    overlap::{self, IouAccumulator},
};

/// Matching parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Pairs whose centers are at least this far apart are not true positives.
    pub max_distance: f64,
}

impl MatchConfig {
    pub const DEFAULT_MAX_DISTANCE: f64 = 5.0;
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_distance: Self::DEFAULT_MAX_DISTANCE,
        }
    }
}

/// Scores of one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    #[serde(flatten)]
    pub counts: DetectionCounts,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f_score: Option<f64>,
    /// Mean IOU of the overlapping pairs.
    pub iou: Option<f64>,
    #[serde(skip)]
    iou_acc: IouAccumulator,
}

impl CategoryReport {
    fn new(counts: DetectionCounts, iou_acc: IouAccumulator) -> Self {
        Self {
            counts,
            precision: counts.precision(),
            recall: counts.recall(),
            f_score: counts.f_score(),
            iou: iou_acc.mean(),
            iou_acc,
        }
    }
}

/// Comparison of a reference object list with a candidate list for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Every category present in either list.
    pub categories: BTreeMap<Category, CategoryReport>,
    /// Precision over the pooled counts of all categories.
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f_score: Option<f64>,
    /// Mean IOU over the overlapping pairs of all categories.
    pub mean_iou: Option<f64>,
    /// Reference objects without an overlapping candidate of the same category.
    pub only_in_reference: Vec<GameObject>,
    /// Candidate objects without an overlapping reference of the same category.
    pub only_in_candidate: Vec<GameObject>,
    pub reference_objects: Vec<String>,
    pub candidate_objects: Vec<String>,
}

impl MatchReport {
    pub fn counts(&self) -> impl Iterator<Item = (&Category, &DetectionCounts)> {
        self.categories
            .iter()
            .map(|(category, report)| (category, &report.counts))
    }

    pub(crate) fn iou_accumulators(&self) -> impl Iterator<Item = (&Category, &IouAccumulator)> {
        self.categories
            .iter()
            .filter(|(_, report)| report.iou_acc.count > 0)
            .map(|(category, report)| (category, &report.iou_acc))
    }

    /// Precision of each category, leaving out categories without candidates.
    #[must_use]
    pub fn precisions(&self) -> BTreeMap<Category, f64> {
        self.collect(|report| report.precision)
    }

    /// Recall of each category, leaving out categories without references.
    #[must_use]
    pub fn recalls(&self) -> BTreeMap<Category, f64> {
        self.collect(|report| report.recall)
    }

    #[must_use]
    pub fn f_scores(&self) -> BTreeMap<Category, f64> {
        self.collect(|report| report.f_score)
    }

    /// Mean IOU of each category that has at least one overlapping pair.
    #[must_use]
    pub fn ious(&self) -> BTreeMap<Category, f64> {
        self.collect(|report| report.iou)
    }

    fn collect<F>(&self, f: F) -> BTreeMap<Category, f64>
    where
        F: Fn(&CategoryReport) -> Option<f64>,
    {
        self.categories
            .iter()
            .filter_map(|(&category, report)| Some((category, f(report)?)))
            .collect()
    }
}

/// Compares two object lists with the default [`MatchConfig`].
///
/// ```
/// use ramsight_core::{Category, GameObject, Position};
/// use ramsight_stats::score;
///
/// let reference = [GameObject::new(Category::Jet).with_position(Position::new(10, 10))];
/// let candidate = [GameObject::new(Category::Jet).with_position(Position::new(11, 11))];
///
/// let report = score(&reference, &candidate);
/// assert_eq!(report.categories[&Category::Jet].counts.true_positives, 1);
/// assert_eq!(report.precision, Some(1.0));
/// assert_eq!(report.recall, Some(1.0));
/// ```
#[must_use]
pub fn score(reference: &[GameObject], candidate: &[GameObject]) -> MatchReport {
    score_with(reference, candidate, &MatchConfig::default())
}

/// Compares two object lists.
#[must_use]
pub fn score_with(
    reference: &[GameObject],
    candidate: &[GameObject],
    config: &MatchConfig,
) -> MatchReport {
    let reference_by_category = partition(reference);
    let candidate_by_category = partition(candidate);

    let mut categories = BTreeMap::new();
    let mut only_in_reference = vec![];
    let mut only_in_candidate = vec![];
    for category in reference_by_category
        .keys()
        .chain(candidate_by_category.keys())
    {
        if categories.contains_key(category) {
            continue;
        }
        let refs = reference_by_category
            .get(category)
            .map_or(&[][..], Vec::as_slice);
        let cands = candidate_by_category
            .get(category)
            .map_or(&[][..], Vec::as_slice);

        let counts = DetectionCounts::classify(refs, cands, config.max_distance);
        let iou = overlap::overlapping_pairs(refs, cands);
        only_in_reference.extend(overlap::without_overlap(refs, cands).cloned());
        only_in_candidate.extend(overlap::without_overlap(cands, refs).cloned());
        categories.insert(*category, CategoryReport::new(counts, iou));
    }

    let pooled = detection::pooled(categories.values().map(|report| &report.counts));
    let mean_iou = categories
        .values()
        .fold(IouAccumulator::default(), |mut acc, report| {
            acc.merge(&report.iou_acc);
            acc
        })
        .mean();

    MatchReport {
        categories,
        precision: pooled.precision(),
        recall: pooled.recall(),
        f_score: pooled.f_score(),
        mean_iou,
        only_in_reference,
        only_in_candidate,
        reference_objects: reference.iter().map(ToString::to_string).collect(),
        candidate_objects: candidate.iter().map(ToString::to_string).collect(),
    }
}

fn partition(objects: &[GameObject]) -> BTreeMap<Category, Vec<&GameObject>> {
    let mut map = BTreeMap::<Category, Vec<_>>::new();
    for object in objects {
        map.entry(object.category()).or_default().push(object);
    }
    map
}

#[cfg(test)]
mod tests {
    use ramsight_core::{Position, Size};

    use super::*;

    fn object(category: Category, x: i32, y: i32, w: i32, h: i32) -> GameObject {
        GameObject::new(category)
            .with_position(Position::new(x, y))
            .with_size(Size::new(w, h))
    }

    #[test]
    fn test_empty_inputs() {
        let report = score(&[], &[]);
        assert!(report.categories.is_empty());
        assert!(report.precisions().is_empty());
        assert!(report.f_scores().is_empty());
        assert_eq!(report.precision, None);
        assert_eq!(report.mean_iou, None);
    }

    #[test]
    fn test_missing_category_in_candidates() {
        let reference = [
            object(Category::Jet, 0, 0, 10, 10),
            object(Category::Jet, 50, 50, 10, 10),
        ];
        let report = score(&reference, &[]);
        let jet = &report.categories[&Category::Jet];
        assert_eq!(jet.counts.false_negatives, 2);
        assert_eq!(jet.counts.false_positives, 0);
        assert!(report.precisions().is_empty());
        assert_eq!(report.recalls()[&Category::Jet], 0.0);
        assert!(report.f_scores().is_empty());
        assert_eq!(report.only_in_reference.len(), 2);
        assert!(report.only_in_candidate.is_empty());
    }

    #[test]
    fn test_categories_are_matched_separately() {
        let reference = [
            object(Category::Player, 76, 145, 7, 13),
            object(Category::Tanker, 30, 40, 16, 8),
        ];
        // right place, wrong category
        let candidate = [
            object(Category::Player, 77, 145, 7, 13),
            object(Category::Helicopter, 30, 40, 8, 10),
        ];
        let report = score(&reference, &candidate);
        assert_eq!(report.categories.len(), 3);
        assert_eq!(report.f_scores()[&Category::Player], 1.0);
        assert_eq!(report.recalls()[&Category::Tanker], 0.0);
        assert_eq!(report.precisions()[&Category::Helicopter], 0.0);
        assert_eq!(report.precision, Some(0.5));
        assert_eq!(report.recall, Some(0.5));
        assert_eq!(report.only_in_reference[0].category(), Category::Tanker);
        assert_eq!(report.only_in_candidate[0].category(), Category::Helicopter);
    }

    #[test]
    fn test_iou() {
        let reference = [
            object(Category::Bridge, 60, 20, 32, 18),
            object(Category::Jet, 0, 0, 4, 4),
        ];
        let candidate = [
            object(Category::Bridge, 60, 20, 32, 18),
            object(Category::Jet, 2, 0, 4, 4),
        ];
        let report = score(&reference, &candidate);
        assert_eq!(report.ious()[&Category::Bridge], 1.0);
        assert!((report.ious()[&Category::Jet] - 8.0 / 24.0).abs() < 1e-12);
        let expected = (1.0 + 8.0 / 24.0) / 2.0;
        assert!((report.mean_iou.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let reference = [object(Category::Jet, 0, 0, 10, 1)];
        let candidate = [object(Category::Jet, 8, 0, 10, 1)];
        assert_eq!(score(&reference, &candidate).precision, Some(0.0));
        let config = MatchConfig { max_distance: 10.0 };
        assert_eq!(score_with(&reference, &candidate, &config).precision, Some(1.0));
    }

    #[test]
    fn test_report_json() {
        let reference = [object(Category::Lives, 57, 192, 6, 8)];
        let report = score(&reference, &reference);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["categories"]["Lives"]["true_positives"], 1);
        assert_eq!(json["categories"]["Lives"]["iou"], 1.0);
        assert_eq!(json["reference_objects"][0], "Lives at (57, 192), (6, 8)");
    }

    #[test]
    fn test_detection_at_the_coordinate_limit() {
        let far: GameObject = serde_json::from_str(
            r#"{"category": "Jet", "x": 2147483647, "y": 0, "w": 10, "h": 1}"#,
        )
        .unwrap();
        let report = score(&[far], &[object(Category::Jet, 0, 0, 10, 1)]);
        let jet = &report.categories[&Category::Jet];
        assert_eq!(jet.counts.false_negatives, 1);
        assert_eq!(jet.counts.false_positives, 1);
        assert_eq!(jet.iou, None);
        assert_eq!(report.only_in_reference.len(), 1);
        assert_eq!(report.only_in_candidate.len(), 1);
    }
}
