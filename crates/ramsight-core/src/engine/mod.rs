//! Frame-by-frame object extraction.
//!
//! - [`ObjectRegistry`] - Fixed-length slot table holding the objects of one game
//! - [`GameDecoder`] - Per-game stateful decoder filling a registry from RAM
//! - [`ExtractionSession`] - A decoder and its registry driven together over an episode
//! - [`RawField`] - Named fields read by a game's raw extractor
//!
//! # Frame Flow
//!
//! 1. Create the decoder for the game and call [`GameDecoder::initialize`]
//! 2. For every frame, pass the RAM snapshot to [`GameDecoder::decode`]
//! 3. Read the present objects with [`ObjectRegistry::objects`]
//!
//! Decoders must see every frame in order: slot continuity and growth phases depend
//! on the previous frame.

pub use self::{decoder::*, registry::*, session::*};

mod decoder;
mod registry;
mod session;
