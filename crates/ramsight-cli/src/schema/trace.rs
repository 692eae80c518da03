use ramsight_core::RamSnapshot;
use serde::{Deserialize, Serialize};

/// RAM snapshots of one episode, in frame order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamTrace {
    /// Each frame is an array of 128 bytes
    pub frames: Vec<RamSnapshot>,
}
