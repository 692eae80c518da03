use arrayvec::ArrayVec;
use ramsight_core::{BoxedGameDecoder, ExtractionMode, ExtractionSession, RawExtractor};

use crate::riverraid;

/// Creates a fresh decoder for one episode.
pub type DecoderFactory = fn() -> BoxedGameDecoder;

/// A game known to the extraction engine.
#[derive(Debug, Clone, Copy)]
pub struct GameEntry {
    /// Lookup key, matched case-insensitively.
    pub id: &'static str,
    pub name: &'static str,
    pub revised: Option<DecoderFactory>,
    pub raw: Option<RawExtractor>,
}

impl GameEntry {
    /// Extraction modes this game implements.
    #[must_use]
    pub fn modes(&self) -> ArrayVec<ExtractionMode, 2> {
        let mut modes = ArrayVec::new();
        if self.raw.is_some() {
            modes.push(ExtractionMode::Raw);
        }
        if self.revised.is_some() {
            modes.push(ExtractionMode::Revised);
        }
        modes
    }

    #[must_use]
    pub fn supports(&self, mode: ExtractionMode) -> bool {
        match mode {
            ExtractionMode::Raw => self.raw.is_some(),
            ExtractionMode::Revised => self.revised.is_some(),
        }
    }
}

#[must_use]
pub fn all_games() -> Vec<GameEntry> {
    vec![riverraid::ENTRY]
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum GameLookupError {
    #[display("no such game '{game}'")]
    UnknownGame { game: String },
    #[display("{mode} mode is not implemented for game '{game}'")]
    ModeNotImplemented { game: String, mode: ExtractionMode },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("game '{id}' is registered more than once")]
pub struct DuplicateGameError {
    pub id: String,
}

/// Registered games, looked up by identifier.
///
/// # Example
///
/// ```
/// use ramsight_games::{GameLookupError, GameTable};
///
/// let table = GameTable::builtin();
/// let decoder = table.decoder("RiverRaid").unwrap();
/// assert_eq!(decoder.game_id(), "riverraid");
///
/// assert!(matches!(
///     table.decoder("pong"),
///     Err(GameLookupError::UnknownGame { .. })
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct GameTable {
    entries: Vec<GameEntry>,
}

impl GameTable {
    /// Builds a table, rejecting identifiers that collide case-insensitively.
    pub fn new(entries: Vec<GameEntry>) -> Result<Self, DuplicateGameError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i]
                .iter()
                .any(|other| other.id.eq_ignore_ascii_case(entry.id))
            {
                return Err(DuplicateGameError {
                    id: entry.id.to_owned(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Table of every game shipped with this crate.
    ///
    /// # Panics
    ///
    /// Panics if two built-in games share an identifier.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(all_games()).expect("built-in game ids should never collide")
    }

    #[must_use]
    pub fn entries(&self) -> &[GameEntry] {
        &self.entries
    }

    pub fn find(&self, game: &str) -> Result<&GameEntry, GameLookupError> {
        self.entries
            .iter()
            .find(|entry| entry.id.eq_ignore_ascii_case(game))
            .ok_or_else(|| GameLookupError::UnknownGame {
                game: game.to_owned(),
            })
    }

    /// Creates a fresh revised-mode decoder for `game`.
    pub fn decoder(&self, game: &str) -> Result<BoxedGameDecoder, GameLookupError> {
        let entry = self.find(game)?;
        let factory = entry
            .revised
            .ok_or_else(|| not_implemented(entry, ExtractionMode::Revised))?;
        Ok(factory())
    }

    pub fn raw_extractor(&self, game: &str) -> Result<RawExtractor, GameLookupError> {
        let entry = self.find(game)?;
        entry
            .raw
            .ok_or_else(|| not_implemented(entry, ExtractionMode::Raw))
    }

    /// Creates a decoder for `game` and initializes it.
    pub fn session(&self, game: &str, hud: bool) -> Result<ExtractionSession, GameLookupError> {
        let decoder = self.decoder(game)?;
        Ok(ExtractionSession::new(decoder, hud))
    }
}

fn not_implemented(entry: &GameEntry, mode: ExtractionMode) -> GameLookupError {
    GameLookupError::ModeNotImplemented {
        game: entry.id.to_owned(),
        mode,
    }
}

#[cfg(test)]
mod tests {
    use ramsight_core::{RamSnapshot, RawField};

    use super::*;

    fn empty_fields(_ram: &RamSnapshot) -> Vec<RawField> {
        vec![]
    }

    const RAW_ONLY: GameEntry = GameEntry {
        id: "pong",
        name: "Pong",
        revised: None,
        raw: Some(empty_fields),
    };

    #[test]
    fn test_builtin_ids_are_unique() {
        assert!(GameTable::new(all_games()).is_ok());
        let table = GameTable::builtin();
        assert_eq!(table.entries().len(), all_games().len());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut shouted = RAW_ONLY;
        shouted.id = "PONG";
        let err = GameTable::new(vec![RAW_ONLY, shouted]).unwrap_err();
        assert_eq!(err.id, "PONG");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = GameTable::builtin();
        assert_eq!(table.find("RIVERRAID").unwrap().name, "River Raid");
        assert!(table.raw_extractor("riverRaid").is_ok());
        assert!(table.session("riverraid", true).is_ok());
    }

    #[test]
    fn test_missing_mode() {
        let table = GameTable::new(vec![RAW_ONLY, riverraid::ENTRY]).unwrap();
        let err = table.decoder("Pong").unwrap_err();
        assert!(matches!(
            &err,
            GameLookupError::ModeNotImplemented {
                game,
                mode: ExtractionMode::Revised,
            } if game == "pong"
        ));
        assert_eq!(err.to_string(), "revised mode is not implemented for game 'pong'");
        assert_eq!(RAW_ONLY.modes().as_slice(), &[ExtractionMode::Raw]);
        assert!(!RAW_ONLY.supports(ExtractionMode::Revised));
    }

    #[test]
    fn test_unknown_game() {
        let err = GameTable::builtin().raw_extractor("pitfall").unwrap_err();
        assert_eq!(err.to_string(), "no such game 'pitfall'");
    }
}
