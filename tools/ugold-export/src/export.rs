//! Export orchestration
//!
//! Runs the geometry encoder against the rest pose, the animation quantizer
//! across the frame range, and the script renderer, all into memory. The
//! three files are committed to disk only after every stage has succeeded,
//! so a failed export leaves nothing behind.

use std::path::Path;

use ugold_common::{aniv_file_path, data_file_path, script_file_path};

use crate::animation::{encode_animation, FrameRange};
use crate::error::ExportError;
use crate::mesh::encode_geometry;
use crate::scene::{resolve_mesh, SceneDoc};
use crate::script::generate_script;
use crate::timeline::BakedTimeline;

/// Default model scale applied before quantization
pub const DEFAULT_SCALE: f32 = 32.0;
/// Smallest accepted model scale
pub const MIN_SCALE: f32 = 1.0;
/// Largest accepted model scale
pub const MAX_SCALE: f32 = 256.0;

/// User-facing export options.
#[derive(Debug, Clone, Copy)]
pub struct ExportConfig {
    /// Model scale applied before quantization, in `[MIN_SCALE, MAX_SCALE]`
    pub scale: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

/// The three fully-encoded outputs of one export run.
pub struct ExportBundle {
    pub geometry: Vec<u8>,
    pub animation: Vec<u8>,
    pub script: String,
    pub frame_count: u16,
}

/// Resolve the scene's mesh and encode all three outputs in memory.
///
/// `name` is the model/class name, normally the final component of the
/// output base path.
pub fn export_scene(
    scene: &SceneDoc,
    name: &str,
    range: FrameRange,
    config: &ExportConfig,
) -> Result<ExportBundle, ExportError> {
    let object = resolve_mesh(scene)?;
    let mesh = object.mesh.as_ref().ok_or(ExportError::NoMeshResolved)?;

    tracing::info!(
        "exporting '{}' as {}: {} verts, {} faces, frames {}..={}",
        object.name,
        name,
        mesh.vertices.len(),
        mesh.faces.len(),
        range.start,
        range.end
    );

    let geometry = encode_geometry(mesh)?;

    let mut timeline = BakedTimeline::new(mesh);
    let animation = encode_animation(
        &mut timeline,
        range,
        config.scale,
        mesh.vertices.len() as u16,
    );

    let script = generate_script(name, range.count(), &mesh.materials);

    Ok(ExportBundle {
        geometry,
        animation,
        script,
        frame_count: range.count(),
    })
}

/// Commit an encoded bundle to the three sibling files of `base`.
pub fn write_bundle(base: &Path, bundle: &ExportBundle) -> Result<(), ExportError> {
    write_file(&data_file_path(base), &bundle.geometry)?;
    write_file(&aniv_file_path(base), &bundle.animation)?;
    write_file(&script_file_path(base), bundle.script.as_bytes())?;
    Ok(())
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), ExportError> {
    tracing::debug!("writing {} bytes to {:?}", data.len(), path);
    std::fs::write(path, data).map_err(|source| ExportError::FileOpenFailure {
        path: path.to_path_buf(),
        source,
    })
}
