//! Timeline collaborator
//!
//! The host owns the scene's current frame as shared mutable state, so the
//! animation quantizer drives it strictly sequentially through this trait:
//! advance, evaluate, encode, drop the snapshot, next frame. A snapshot is
//! never reused across frames.

use hashbrown::HashMap;

use crate::scene::MeshData;

/// Fully-evaluated vertex positions for one timeline frame.
#[derive(Debug)]
pub struct MeshSnapshot {
    /// Deformed positions in mesh vertex order
    pub positions: Vec<[f32; 3]>,
}

pub trait Timeline {
    /// Advance the host timeline to `frame`. The mutation must be fully
    /// applied before the next evaluation.
    fn set_frame(&mut self, frame: i32);

    /// Evaluate the mesh with all deformation applied at the current frame
    /// ("preview" fidelity). Ownership of the snapshot moves to the caller;
    /// dropping it releases the evaluation.
    fn evaluate(&mut self) -> MeshSnapshot;
}

/// Timeline over the baked per-frame samples of a scene document.
///
/// Frames without a baked sample evaluate to the rest pose, the same way a
/// host evaluates an object nothing animates.
pub struct BakedTimeline {
    rest: Vec<[f32; 3]>,
    frames: HashMap<i32, Vec<[f32; 3]>>,
    current: i32,
}

impl BakedTimeline {
    pub fn new(mesh: &MeshData) -> Self {
        let frames = mesh
            .frames
            .iter()
            .map(|s| (s.frame, s.positions.clone()))
            .collect();
        Self {
            rest: mesh.vertices.clone(),
            frames,
            current: 0,
        }
    }
}

impl Timeline for BakedTimeline {
    fn set_frame(&mut self, frame: i32) {
        self.current = frame;
    }

    fn evaluate(&mut self) -> MeshSnapshot {
        let positions = self
            .frames
            .get(&self.current)
            .unwrap_or(&self.rest)
            .clone();
        MeshSnapshot { positions }
    }
}
