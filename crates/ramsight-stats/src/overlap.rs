//! Box overlap between objects of the two channels.

use ramsight_core::{BoundingBox, GameObject};
use serde::{Deserialize, Serialize};

/// Intersection over union of two boxes, `0.0` when they do not overlap.
///
/// ```
/// use ramsight_core::{BoundingBox, Position, Size};
/// use ramsight_stats::overlap::iou;
///
/// let a = BoundingBox::new(Position::new(0, 0), Size::new(4, 4));
/// let b = BoundingBox::new(Position::new(2, 0), Size::new(4, 4));
/// assert!((iou(&a, &b) - 8.0 / 24.0).abs() < 1e-12);
/// ```
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let intersection = a.intersection_area(b);
    if intersection == 0 {
        return 0.0;
    }
    let intersection = intersection as f64;
    intersection / (a.area() as f64 + b.area() as f64 - intersection)
}

/// Running sum of IOU values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IouAccumulator {
    pub sum: f64,
    pub count: u32,
}

impl IouAccumulator {
    pub fn add(&mut self, iou: f64) {
        self.sum += iou;
        self.count += 1;
    }

    pub fn merge(&mut self, other: &Self) {
        self.sum += other.sum;
        self.count += other.count;
    }

    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

/// IOU of every overlapping reference/candidate pair.
///
/// All objects are expected to share one category.
#[must_use]
pub fn overlapping_pairs(reference: &[&GameObject], candidate: &[&GameObject]) -> IouAccumulator {
    let mut acc = IouAccumulator::default();
    for r in reference {
        for c in candidate {
            let (a, b) = (r.bounding_box(), c.bounding_box());
            if a.intersection_area(&b) > 0 {
                acc.add(iou(&a, &b));
            }
        }
    }
    acc
}

/// Objects of `objects` whose box overlaps no box of `others`.
pub fn without_overlap<'a>(
    objects: &[&'a GameObject],
    others: &[&GameObject],
) -> impl Iterator<Item = &'a GameObject> {
    let boxes: Vec<_> = others.iter().map(|o| o.bounding_box()).collect();
    objects.iter().copied().filter(move |object| {
        let bbox = object.bounding_box();
        !boxes.iter().any(|other| bbox.intersection_area(other) > 0)
    })
}
