use crate::GameObject;

/// Fixed-length table of object slots for one game.
///
/// Each slot has a fixed meaning decided by the game's decoder (the player, the
/// `i`-th enemy lane, the score display, ...). Empty slots are `None`. The length
/// never changes after construction: decoders only fill and clear slots.
///
/// # Example
///
/// ```
/// use ramsight_core::{Category, GameObject, ObjectRegistry};
///
/// let mut registry = ObjectRegistry::new(3);
/// registry.set(0, GameObject::new(Category::Player));
///
/// assert_eq!(registry.len(), 3);
/// assert_eq!(registry.objects().count(), 1);
/// assert!(registry.get(1).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectRegistry {
    slots: Vec<Option<GameObject>>,
    step: u64,
}

impl ObjectRegistry {
    /// Creates a registry of `len` empty slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            step: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of frames decoded into this registry since it was created.
    #[must_use]
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Marks the start of a new frame. Called by [`GameDecoder::decode`].
    ///
    /// [`GameDecoder::decode`]: crate::GameDecoder::decode
    pub fn advance(&mut self) {
        self.step += 1;
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&GameObject> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut GameObject> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Stores `object` in `slot`, replacing the previous occupant.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    pub fn set(&mut self, slot: usize, object: GameObject) {
        self.slots[slot] = Some(object);
    }

    /// Empties `slot`. Out-of-range slots are ignored.
    pub fn clear(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }

    /// Removes the object of `slot` and returns it.
    pub fn take(&mut self, slot: usize) -> Option<GameObject> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Raw view of the slots, empty ones included.
    #[must_use]
    pub fn slots(&self) -> &[Option<GameObject>] {
        &self.slots
    }

    /// Iterates over the present objects in slot order.
    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.slots.iter().flatten()
    }

    /// Clones the present objects in slot order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<GameObject> {
        self.objects().cloned().collect()
    }
}
