//! Game table and per-game RAM decoders.
//!
//! Every supported game registers a [`GameEntry`] in [`all_games`]. An entry provides
//! up to two extraction modes:
//!
//! - **Revised** - a stateful [`GameDecoder`](ramsight_core::GameDecoder) that rebuilds
//!   positioned objects frame by frame
//! - **Raw** - a stateless [`RawExtractor`](ramsight_core::RawExtractor) returning
//!   named RAM fields
//!
//! Look games up through [`GameTable`], which matches identifiers case-insensitively
//! and reports unknown games or missing modes as [`GameLookupError`].
//!
//! # Supported Games
//!
//! - [`riverraid`] - River Raid (raw and revised)

pub use self::table::*;

pub mod riverraid;
mod table;
