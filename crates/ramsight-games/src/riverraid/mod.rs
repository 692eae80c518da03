//! River Raid.
//!
//! The player flies up a scrolling river. Enemies, bridges and fuel depots live in
//! six RAM slots that only store a horizontal lane, a size byte and a type code;
//! vertical positions are not stored at all. The revised decoder therefore tracks
//! every object from the moment it appears above the top edge and moves it down
//! one pixel per scrolling frame.
//!
//! # Registry Slots
//!
//! | slot | object |
//! |---|---|
//! | 0 | Player |
//! | 1 | `PlayerMissile` |
//! | 2..8 | enemy slots 0..6 |
//! | 8 | `PlayerScore` (HUD) |
//! | 9 | Lives (HUD) |
//! | 10 | `FuelMeter` (HUD) |

pub use self::{decoder::*, raw::*};

use crate::GameEntry;

mod decoder;
pub mod layout;
mod raw;

pub const ID: &str = "riverraid";

pub const ENTRY: GameEntry = GameEntry {
    id: ID,
    name: "River Raid",
    revised: Some(RiverRaidDecoder::boxed),
    raw: Some(raw_fields),
};
