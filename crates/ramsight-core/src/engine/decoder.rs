use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ObjectRegistry, RamSnapshot};

/// How objects are extracted from RAM.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Named fields read straight from RAM, without object reconstruction.
    #[display("raw")]
    Raw,
    /// Stateful decoding into positioned objects.
    #[display("revised")]
    Revised,
}

/// Error returned when parsing an unknown [`ExtractionMode`] name.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown extraction mode '{name}', expected 'raw' or 'revised'")]
pub struct ParseExtractionModeError {
    pub name: String,
}

impl std::str::FromStr for ExtractionMode {
    type Err = ParseExtractionModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "revised" => Ok(Self::Revised),
            _ => Err(ParseExtractionModeError { name: s.to_owned() }),
        }
    }
}

/// Per-game stateful RAM decoder.
///
/// A decoder value holds all scratch state a game needs across frames (objects
/// still above the visible band, previous status bytes, ...). Create one per
/// episode and feed it every frame in order.
pub trait GameDecoder: fmt::Debug + Send {
    /// Identifier of the decoded game.
    fn game_id(&self) -> &str;

    /// Resets the decoder state and returns a fresh registry.
    ///
    /// Permanent slots (the player, HUD elements when `hud` is set) are present;
    /// transient slots are empty.
    fn initialize(&mut self, hud: bool) -> ObjectRegistry;

    /// Updates `registry` for one frame. Never fails on frame data: unexpected
    /// values clear the affected slot.
    ///
    /// Implementations call [`ObjectRegistry::advance`] exactly once per call.
    fn decode(&mut self, registry: &mut ObjectRegistry, ram: &RamSnapshot, hud: bool);

    fn clone_boxed(&self) -> BoxedGameDecoder;
}

pub type BoxedGameDecoder = Box<dyn GameDecoder>;

impl Clone for BoxedGameDecoder {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Value of a field read by a raw extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:.2}"),
            Self::Bytes(bytes) => write!(f, "{bytes:?}"),
        }
    }
}

impl From<u8> for RawValue {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&[u8]> for RawValue {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

/// A named field of a raw extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    pub name: String,
    pub value: RawValue,
}

impl RawField {
    #[must_use]
    pub fn new(name: &str, value: impl Into<RawValue>) -> Self {
        Self {
            name: name.to_owned(),
            value: value.into(),
        }
    }
}

/// Raw extractor of a game: reads named fields without keeping state.
pub type RawExtractor = fn(&RamSnapshot) -> Vec<RawField>;
