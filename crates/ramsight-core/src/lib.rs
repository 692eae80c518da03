//! Object-centric state extraction from Atari 2600 RAM.
//!
//! [`core`] holds the entity model shared by every game (categories, positions,
//! objects and RAM snapshots). [`engine`] holds the per-game decoder contract and
//! the registry decoders fill.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
