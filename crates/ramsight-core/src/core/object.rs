use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    category::{Category, ValueKind},
    geometry::{BoundingBox, Position, Size},
};

/// RGB color triple.
pub type Rgb = [u8; 3];

/// Variant-specific data carried next to the common object fields.
///
/// The payload is chosen from the category when the object is constructed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Payload {
    #[default]
    Plain,
    Value { kind: ValueKind, value: i64 },
}

/// An object of a running game: a player, an enemy, a HUD element, ...
///
/// Every object always has a position and a size (zero by default) and a two-entry
/// position history. The history is updated by [`GameObject::set_position`], which
/// must therefore be called once per observed frame for objects that persist, even
/// when they did not move.
///
/// # Example
///
/// ```
/// use ramsight_core::{Category, GameObject, Position};
///
/// let mut tanker = GameObject::new(Category::Tanker).with_position(Position::new(30, 40));
/// assert_eq!(tanker.velocity(), (0, 0));
///
/// tanker.set_position(Position::new(30, 42));
/// assert_eq!(tanker.history(), [Position::new(30, 42), Position::new(30, 40)]);
/// assert_eq!(tanker.velocity(), (0, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ObjectRecord", into = "ObjectRecord")]
pub struct GameObject {
    category: Category,
    position: Position,
    prev_position: Option<Position>,
    size: Size,
    rgb: Option<Rgb>,
    hud: bool,
    orientation: i32,
    payload: Payload,
}

impl GameObject {
    /// Creates an object of `category` at the origin with zero size.
    #[must_use]
    pub fn new(category: Category) -> Self {
        let payload = match category.value_kind() {
            Some(kind) => Payload::Value { kind, value: 0 },
            None => Payload::Plain,
        };
        Self {
            category,
            position: Position::default(),
            prev_position: None,
            size: Size::default(),
            rgb: None,
            hud: category.is_hud(),
            orientation: 0,
            payload,
        }
    }

    /// Sets the initial position without recording history.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_rgb(mut self, rgb: Rgb) -> Self {
        self.rgb = Some(rgb);
        self
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.position.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.position.y
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn w(&self) -> i32 {
        self.size.w
    }

    #[must_use]
    pub fn h(&self) -> i32 {
        self.size.h
    }

    #[must_use]
    pub fn rgb(&self) -> Option<Rgb> {
        self.rgb
    }

    #[must_use]
    pub fn is_hud(&self) -> bool {
        self.hud
    }

    #[must_use]
    pub fn orientation(&self) -> i32 {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: i32) {
        self.orientation = orientation;
    }

    #[must_use]
    pub fn payload(&self) -> Payload {
        self.payload
    }

    /// Moves the object, keeping the replaced position as the previous one.
    pub fn set_position(&mut self, position: Position) {
        self.prev_position = Some(self.position);
        self.position = position;
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_width(&mut self, w: i32) {
        self.size.w = w;
    }

    pub fn set_height(&mut self, h: i32) {
        self.size.h = h;
    }

    /// Position at the previous observation (the current one until the object moved once).
    #[must_use]
    pub fn prev_position(&self) -> Position {
        self.prev_position.unwrap_or(self.position)
    }

    /// Current and previous positions, in that order.
    #[must_use]
    pub fn history(&self) -> [Position; 2] {
        [self.position, self.prev_position()]
    }

    /// Displacement since the previous observation as `(dx, dy)`.
    #[must_use]
    pub fn velocity(&self) -> (i32, i32) {
        let prev = self.prev_position();
        (self.position.x - prev.x, self.position.y - prev.y)
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.position, self.size)
    }

    #[must_use]
    pub fn xywh(&self) -> (i32, i32, i32, i32) {
        (self.position.x, self.position.y, self.size.w, self.size.h)
    }

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.position.x) + f64::from(self.size.w) / 2.0,
            f64::from(self.position.y) + f64::from(self.size.h) / 2.0,
        )
    }

    /// Decoded scalar of a value object (score, lives, meter, clock).
    #[must_use]
    pub fn value(&self) -> Option<i64> {
        match self.payload {
            Payload::Value { value, .. } => Some(value),
            Payload::Plain => None,
        }
    }

    /// Updates the scalar of a value object. Has no effect on plain objects.
    pub fn set_value(&mut self, value: i64) {
        if let Payload::Value { value: v, .. } = &mut self.payload {
            *v = value;
        }
    }

    /// Returns `true` if this object's anchor lies within `other`'s bounding box.
    ///
    /// The test is asymmetric: `a.overlaps(b)` does not imply `b.overlaps(a)`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        other.bounding_box().contains(self.position)
    }

    /// Manhattan distance between the centers of both objects.
    #[must_use]
    pub fn manhattan_distance(&self, other: &Self) -> f64 {
        let (x0, y0) = self.center();
        let (x1, y1) = other.center();
        (x0 - x1).abs() + (y0 - y1).abs()
    }

    /// Euclidean distance between the centers of both objects.
    #[must_use]
    pub fn center_distance(&self, other: &Self) -> f64 {
        let (x0, y0) = self.center();
        let (x1, y1) = other.center();
        (x0 - x1).hypot(y0 - y1)
    }

    /// Finds the object of `others` with the smallest Manhattan distance to this one.
    ///
    /// Ties resolve to the first minimal element. Returns `None` if `others` is empty.
    pub fn nearest<'a, I>(&self, others: I) -> Option<(usize, &'a Self)>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut best: Option<(usize, &'a Self, f64)> = None;
        for (i, other) in others.into_iter().enumerate() {
            let distance = self.manhattan_distance(other);
            if best.is_none_or(|(_, _, d)| distance < d) {
                best = Some((i, other, distance));
            }
        }
        best.map(|(i, other, _)| (i, other))
    }
}

impl fmt::Display for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({}, {}), ({}, {})",
            self.category, self.position.x, self.position.y, self.size.w, self.size.h
        )
    }
}

/// Serialized form of [`GameObject`].
///
/// Vision detections only need `category`, `x`, `y`, `w` and `h`; the remaining
/// fields default.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObjectRecord {
    category: Category,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prev: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rgb: Option<Rgb>,
    #[serde(default)]
    hud: bool,
    #[serde(default)]
    orientation: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<i64>,
}

impl From<ObjectRecord> for GameObject {
    fn from(record: ObjectRecord) -> Self {
        let mut object = GameObject::new(record.category)
            .with_position(Position::new(record.x, record.y))
            .with_size(Size::new(record.w, record.h));
        object.prev_position = record.prev;
        object.rgb = record.rgb;
        object.hud = record.hud || record.category.is_hud();
        object.orientation = record.orientation;
        if let Some(value) = record.value {
            object.set_value(value);
        }
        object
    }
}

impl From<GameObject> for ObjectRecord {
    fn from(object: GameObject) -> Self {
        Self {
            category: object.category,
            x: object.position.x,
            y: object.position.y,
            w: object.size.w,
            h: object.size.h,
            prev: object.prev_position,
            rgb: object.rgb,
            hud: object.hud,
            orientation: object.orientation,
            value: object.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_at(category: Category, x: i32, y: i32, w: i32, h: i32) -> GameObject {
        GameObject::new(category)
            .with_position(Position::new(x, y))
            .with_size(Size::new(w, h))
    }

    #[test]
    fn test_defaults() {
        let object = GameObject::new(Category::Jet);
        assert_eq!(object.position(), Position::new(0, 0));
        assert_eq!(object.size(), Size::new(0, 0));
        assert_eq!(object.velocity(), (0, 0));
        assert_eq!(object.history(), [Position::new(0, 0); 2]);
        assert_eq!(object.rgb(), None);
        assert_eq!(object.orientation(), 0);
        assert!(!object.is_hud());
        assert!(object.payload().is_plain());
    }

    #[test]
    fn test_history_tracks_previous_frame() {
        let mut object = object_at(Category::Player, 77, 145, 7, 13);
        object.set_position(Position::new(80, 145));
        object.set_position(Position::new(84, 145));

        let history = object.history();
        assert_eq!(history, [Position::new(84, 145), Position::new(80, 145)]);
        // reading does not consume anything
        assert_eq!(object.history(), history);
        assert_eq!(object.velocity(), (4, 0));
    }

    #[test]
    fn test_set_position_without_move_zeroes_velocity() {
        let mut object = object_at(Category::Tanker, 10, 10, 16, 8);
        object.set_position(Position::new(10, 12));
        object.set_position(Position::new(10, 12));
        assert_eq!(object.velocity(), (0, 0));
    }

    #[test]
    fn test_value_objects() {
        let mut score = GameObject::new(Category::PlayerScore);
        assert_eq!(score.value(), Some(0));
        assert!(score.is_hud());
        score.set_value(321);
        assert_eq!(score.value(), Some(321));

        let mut jet = GameObject::new(Category::Jet);
        jet.set_value(5);
        assert_eq!(jet.value(), None);
    }

    #[test]
    fn test_center_and_bounding_box() {
        let object = object_at(Category::Bridge, 10, 20, 32, 18);
        assert_eq!(object.center(), (26.0, 29.0));
        assert_eq!(object.xywh(), (10, 20, 32, 18));
        assert_eq!(object.bounding_box().area(), 32 * 18);
    }

    #[test]
    fn test_overlaps_is_anchor_containment() {
        let small = object_at(Category::PlayerMissile, 12, 12, 1, 8);
        let big = object_at(Category::Tanker, 10, 10, 16, 8);
        assert!(small.overlaps(&big));
        // big's anchor (10, 10) is outside small's box
        assert!(!big.overlaps(&small));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = object_at(Category::Jet, 0, 0, 2, 2);
        let b = object_at(Category::Jet, 3, 4, 2, 2);
        assert!((a.manhattan_distance(&b) - 7.0).abs() < f64::EPSILON);
        assert!((a.center_distance(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nearest_prefers_first_on_ties() {
        let player = object_at(Category::Player, 50, 50, 0, 0);
        let others = [
            object_at(Category::Jet, 60, 50, 0, 0),
            object_at(Category::Jet, 40, 50, 0, 0),
            object_at(Category::Jet, 55, 50, 0, 0),
            object_at(Category::Jet, 45, 50, 0, 0),
        ];
        let (index, nearest) = player.nearest(&others).unwrap();
        assert_eq!(index, 2);
        assert_eq!(nearest.x(), 55);

        assert!(player.nearest(std::iter::empty()).is_none());
    }

    #[test]
    fn test_display() {
        let object = object_at(Category::Helicopter, 3, -4, 8, 1);
        assert_eq!(object.to_string(), "Helicopter at (3, -4), (8, 1)");
    }

    #[test]
    fn test_deserialize_minimal_detection() {
        let object: GameObject =
            serde_json::from_str(r#"{"category":"Lives","x":57,"y":192,"w":6,"h":8}"#).unwrap();
        assert_eq!(object.category(), Category::Lives);
        assert_eq!(object.xywh(), (57, 192, 6, 8));
        assert!(object.is_hud());
        assert_eq!(object.value(), Some(0));
        assert_eq!(object.velocity(), (0, 0));
    }

    #[test]
    fn test_serialized_object_keeps_history() {
        let mut object = object_at(Category::Jet, 1, 2, 10, 1).with_rgb([117, 181, 239]);
        object.set_position(Position::new(4, 2));
        let json = serde_json::to_string(&object).unwrap();
        let restored: GameObject = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, object);
        assert_eq!(restored.velocity(), (3, 0));
    }
}
