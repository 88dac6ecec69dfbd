//! Animation quantizer (timeline frames → `_a.3d` payload)
//!
//! Iterates the frame range strictly in order, advancing the injected
//! timeline and quantizing each snapshot into packed sample words. Frames
//! are sampled one at a time because advancing the timeline mutates shared
//! host state.

use ugold_common::{pack_frame_positions, AnivHeader};

use crate::timeline::Timeline;

/// Inclusive timeline span; both endpoints are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: i32,
    pub end: i32,
}

impl FrameRange {
    /// Callers must ensure `end >= start` (scene/manifest validation does).
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Number of frames in the span, endpoints included.
    pub fn count(&self) -> u16 {
        (self.end - self.start + 1) as u16
    }
}

/// Encode the animation file payload by sampling every frame in the range.
pub fn encode_animation(
    timeline: &mut dyn Timeline,
    range: FrameRange,
    scale: f32,
    vertex_count: u16,
) -> Vec<u8> {
    let header = AnivHeader::for_vertex_count(range.count(), vertex_count);
    tracing::debug!(
        "animation is {} frames, {} bytes each",
        header.frame_count,
        header.frame_size
    );

    let mut data = Vec::with_capacity(header.file_size());
    data.extend_from_slice(&header.to_bytes());

    for frame in range.start..=range.end {
        timeline.set_frame(frame);
        let snapshot = timeline.evaluate();
        data.extend_from_slice(&pack_frame_positions(&snapshot.positions, scale));
        // snapshot dropped here; the next frame gets a fresh evaluation
    }

    data
}
