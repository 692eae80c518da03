//! RAM layout of River Raid.
//!
//! Offsets index the 128-byte console RAM.

use ramsight_core::SegmentedDigits;

/// Enemy and scenery slots, ordered from the bottom of the playfield upwards.
///
/// Slot 0 always holds the next object to leave the screen. When it does, every
/// other slot moves one position down.
pub mod enemy {
    pub const SLOTS: usize = 6;

    /// Horizontal lane of each slot (`x = 15 * lane - correction`).
    pub const LANE: usize = 20;
    /// Size byte of each slot: high nibble is the signed x correction, bit 3 the orientation.
    pub const SIZE: usize = 26;
    /// Type code of each slot.
    pub const TYPE: usize = 32;

    // type codes; 0 is empty, 1-3 destroyed, 9 scenery (house and tree)
    pub const TYPE_JET: u8 = 4;
    pub const TYPE_HELICOPTER: u8 = 5;
    pub const TYPE_HELICOPTER_ALT: u8 = 6;
    pub const TYPE_TANKER: u8 = 7;
    pub const TYPE_BRIDGE: u8 = 8;
    pub const TYPE_FUEL_DEPOT: u8 = 10;
}

/// River banks.
pub mod terrain {
    pub const GRASS_LAYOUT: usize = 14;
    /// Water width per section: 35 normal, 12 canal, 7 spreading.
    pub const WATER_WIDTH: usize = 38;
    pub const SECTIONS: usize = 6;
}

pub mod player {
    pub const X: usize = 51;
    /// Non-zero while the game waits for the player to start or respawn.
    pub const STATUS: usize = 70;
}

pub mod missile {
    /// Zero when no missile is in flight.
    pub const X: usize = 117;
    /// Distance travelled from the bottom of the playfield.
    pub const Y: usize = 50;
}

pub mod hud {
    pub const FUEL_HIGH: usize = 55;
    pub const FUEL_LOW: usize = 56;
    /// Lives counter, stored as `(lives - 1) * 8`.
    pub const LIVES: usize = 64;
}

/// Score digits, hundreds of thousands first. Each byte is `digit * 8`, 88 is unlit.
pub const SCORE: SegmentedDigits = SegmentedDigits::new(&[77, 79, 81, 83, 85, 87], 88, 8);
