use serde::{Deserialize, Serialize};

/// Top-left anchor of an object in frame-pixel coordinates.
///
/// Coordinates are signed: decoders keep tracking objects that are still above the
/// visible frame edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a bounding box in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    #[must_use]
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

/// Axis-aligned bounding box `(x, y, w, h)`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(position: Position, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            w: size.w,
            h: size.h,
        }
    }

    /// Right edge, in `i64` since `x + w` may not fit an `i32`.
    #[must_use]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.w)
    }

    #[must_use]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.h)
    }

    #[must_use]
    pub fn area(&self) -> i64 {
        i64::from(self.w) * i64::from(self.h)
    }

    /// Area shared by both boxes, `0` when they are disjoint or only touch.
    #[must_use]
    pub fn intersection_area(&self, other: &Self) -> i64 {
        let w = i64::min(self.right(), other.right()) - i64::from(i32::max(self.x, other.x));
        let h = i64::min(self.bottom(), other.bottom()) - i64::from(i32::max(self.y, other.y));
        w.max(0) * h.max(0)
    }

    /// Returns `true` if `position` lies inside this box, edges included.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.x <= position.x
            && i64::from(position.x) <= self.right()
            && self.y <= position.y
            && i64::from(position.y) <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x: i32, y: i32, w: i32, h: i32) -> BoundingBox {
        BoundingBox::new(Position::new(x, y), Size::new(w, h))
    }

    #[test]
    fn test_intersection_area() {
        assert_eq!(bbox(0, 0, 4, 4).intersection_area(&bbox(2, 2, 4, 4)), 4);
        assert_eq!(bbox(0, 0, 4, 4).intersection_area(&bbox(0, 0, 4, 4)), 16);
        // touching edges share no area
        assert_eq!(bbox(0, 0, 4, 4).intersection_area(&bbox(4, 0, 4, 4)), 0);
        assert_eq!(bbox(0, 0, 4, 4).intersection_area(&bbox(10, 10, 1, 1)), 0);
    }

    #[test]
    fn test_contains_is_edge_inclusive() {
        let b = bbox(10, 20, 5, 5);
        assert!(b.contains(Position::new(10, 20)));
        assert!(b.contains(Position::new(15, 25)));
        assert!(!b.contains(Position::new(16, 25)));
        assert!(!b.contains(Position::new(9, 20)));
    }

    #[test]
    fn test_boxes_at_the_coordinate_limit() {
        let far = bbox(i32::MAX, 0, 10, 1);
        assert_eq!(far.right(), i64::from(i32::MAX) + 10);
        assert_eq!(far.intersection_area(&bbox(0, 0, 10, 1)), 0);
        assert_eq!(far.intersection_area(&far), 10);
        assert!(far.contains(Position::new(i32::MAX, 1)));
        assert!(!bbox(0, 0, 10, 1).contains(Position::new(i32::MAX, 0)));

        let huge = bbox(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(huge.bottom(), -1);
        assert!(huge.contains(Position::new(-1, -1)));
    }
}
