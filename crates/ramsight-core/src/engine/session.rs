use crate::{BoxedGameDecoder, GameObject, ObjectRegistry, RamSnapshot};

/// A decoder bound to the registry it fills, for one episode.
///
/// The session owns both halves so each frame is a single [`ExtractionSession::step`]
/// call; the registry is only lent out read-only between steps.
#[derive(Debug, Clone)]
pub struct ExtractionSession {
    decoder: BoxedGameDecoder,
    registry: ObjectRegistry,
    hud: bool,
}

impl ExtractionSession {
    #[must_use]
    pub fn new(mut decoder: BoxedGameDecoder, hud: bool) -> Self {
        let registry = decoder.initialize(hud);
        Self {
            decoder,
            registry,
            hud,
        }
    }

    #[must_use]
    pub fn game_id(&self) -> &str {
        self.decoder.game_id()
    }

    #[must_use]
    pub fn hud(&self) -> bool {
        self.hud
    }

    #[must_use]
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Decodes one frame and returns the updated registry.
    pub fn step(&mut self, ram: &RamSnapshot) -> &ObjectRegistry {
        self.decoder.decode(&mut self.registry, ram, self.hud);
        &self.registry
    }

    /// Decodes one frame and returns a copy of the present objects.
    pub fn step_objects(&mut self, ram: &RamSnapshot) -> Vec<GameObject> {
        self.step(ram).to_vec()
    }

    /// Starts a new episode with fresh decoder state.
    pub fn reset(&mut self) {
        self.registry = self.decoder.initialize(self.hud);
    }
}
