use std::{num::NonZeroUsize, thread};

use ramsight_core::GameObject;

use crate::{DetectionTally, MatchConfig, score_with};

/// Reference and candidate objects of one frame.
#[derive(Debug, Clone, Default)]
pub struct FramePair {
    pub reference: Vec<GameObject>,
    pub candidate: Vec<GameObject>,
}

/// Scores every frame and folds the reports into one tally.
///
/// Frames are split into one contiguous chunk per available core and scored on
/// scoped threads. The result equals scoring the frames one by one in order.
#[must_use]
pub fn score_batch(frames: &[FramePair], config: &MatchConfig) -> DetectionTally {
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    score_batch_with_workers(frames, config, workers)
}

/// Like [`score_batch`], with an explicit number of worker threads.
#[must_use]
pub fn score_batch_with_workers(
    frames: &[FramePair],
    config: &MatchConfig,
    workers: usize,
) -> DetectionTally {
    if frames.is_empty() {
        return DetectionTally::new();
    }
    let chunk_size = frames.len().div_ceil(workers.max(1));
    thread::scope(|s| {
        let handles: Vec<_> = frames
            .chunks(chunk_size)
            .map(|chunk| s.spawn(move || score_sequential(chunk, config)))
            .collect();
        handles
            .into_iter()
            .fold(DetectionTally::new(), |mut tally, handle| {
                match handle.join() {
                    Ok(chunk_tally) => tally.merge(chunk_tally),
                    Err(payload) => std::panic::resume_unwind(payload),
                }
                tally
            })
    })
}

fn score_sequential(frames: &[FramePair], config: &MatchConfig) -> DetectionTally {
    let mut tally = DetectionTally::new();
    for frame in frames {
        tally.update(&score_with(&frame.reference, &frame.candidate, config));
    }
    tally
}
