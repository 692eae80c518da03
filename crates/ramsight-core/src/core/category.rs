use serde::{Deserialize, Serialize};

/// Semantic kind of a game object.
///
/// The category is fixed when an object is constructed and never reassigned. It is also
/// the key the matching engine partitions object lists by, so RAM-decoded objects and
/// vision detections must agree on these names.
///
/// Categories parse from and display as their variant name:
///
/// ```
/// use ramsight_core::Category;
///
/// let category: Category = "FuelDepot".parse().unwrap();
/// assert_eq!(category, Category::FuelDepot);
/// assert_eq!(category.to_string(), "FuelDepot");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[repr(u8)]
pub enum Category {
    /// The player-controlled craft.
    Player = 0,
    /// Shot fired by the player.
    PlayerMissile = 1,
    /// Enemy jet crossing the river.
    Jet = 2,
    /// Enemy helicopter.
    Helicopter = 3,
    /// Enemy ship.
    Tanker = 4,
    /// Bridge spanning the river.
    Bridge = 5,
    /// Fuel depot the player can refuel at.
    FuelDepot = 6,
    /// Player score display.
    PlayerScore = 7,
    /// Remaining lives display.
    Lives = 8,
    /// Fuel gauge.
    FuelMeter = 9,
}

/// Kind of scalar carried by value objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Segmented-digit score.
    Score,
    /// Level of a deployable resource (lives, fuel, oxygen, ...).
    ResourceMeter,
    /// In-game timer.
    Clock,
}

impl Category {
    pub const LEN: usize = 10;

    pub const ALL: [Self; Self::LEN] = [
        Self::Player,
        Self::PlayerMissile,
        Self::Jet,
        Self::Helicopter,
        Self::Tanker,
        Self::Bridge,
        Self::FuelDepot,
        Self::PlayerScore,
        Self::Lives,
        Self::FuelMeter,
    ];

    #[must_use]
    pub const fn as_usize(self) -> usize {
        self as usize
    }

    /// Returns the scalar kind for value objects, `None` for plain objects.
    #[must_use]
    pub const fn value_kind(self) -> Option<ValueKind> {
        match self {
            Self::PlayerScore => Some(ValueKind::Score),
            Self::Lives | Self::FuelMeter => Some(ValueKind::ResourceMeter),
            Self::Player
            | Self::PlayerMissile
            | Self::Jet
            | Self::Helicopter
            | Self::Tanker
            | Self::Bridge
            | Self::FuelDepot => None,
        }
    }

    /// Returns `true` for fixed overlay elements that are not part of the playfield.
    #[must_use]
    pub const fn is_hud(self) -> bool {
        matches!(self, Self::PlayerScore | Self::Lives | Self::FuelMeter)
    }
}
