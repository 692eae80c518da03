use ramsight_core::{GameObject, RamSnapshot};
use serde::{Deserialize, Serialize};

/// Recorded episode with the RAM and the vision detections of every frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedSession {
    pub frames: Vec<SessionFrame>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFrame {
    pub ram: RamSnapshot,
    /// Objects found by the vision detector, used as the reference
    #[serde(default)]
    pub vision: Vec<GameObject>,
}
