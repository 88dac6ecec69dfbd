//! Scene snapshot document
//!
//! The encoders never talk to a host 3D package directly. The host-side
//! collaborator dumps its selection state, mesh data, and baked per-frame
//! vertex positions into this document, and everything downstream works
//! from these plain structs.
//!
//! Structural problems (bad indices, oversized meshes, mismatched frame
//! arrays) are rejected here at load time; the encoders themselves only
//! report the legacy failure classes.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ExportError;

/// Maximum vertex/face count storable in the u16 header fields
pub const MAX_ELEMENT_COUNT: usize = u16::MAX as usize;

/// Maximum vertex count whose per-frame byte size (4 × count) still fits
/// the u16 animation header field
pub const MAX_VERTEX_COUNT: usize = u16::MAX as usize / 4;

/// One dumped scene: timeline span plus every object the host exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDoc {
    /// First frame of the scene timeline
    pub frame_start: i32,
    /// Last frame of the scene timeline (inclusive)
    pub frame_end: i32,
    pub objects: Vec<SceneObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    #[serde(default)]
    pub selected: bool,
    #[serde(default = "default_true")]
    pub selectable: bool,
    /// Present iff `kind` is `Mesh`
    #[serde(default)]
    pub mesh: Option<MeshData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Mesh,
    Camera,
    Light,
    Armature,
    Empty,
}

/// Rest-pose mesh data in host order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshData {
    /// Rest-pose vertex positions
    pub vertices: Vec<[f32; 3]>,
    /// Loop table: loop index → vertex index
    pub loops: Vec<u32>,
    pub faces: Vec<FaceData>,
    /// Active UV layer, one (u, v) per loop; absent when the mesh has none
    #[serde(default)]
    pub uv_layer: Option<Vec<[f32; 2]>>,
    /// Material names in slot order
    #[serde(default)]
    pub materials: Vec<String>,
    /// Baked deformed positions per frame, "preview" fidelity
    #[serde(default)]
    pub frames: Vec<FrameSample>,
}

/// One polygon: its corners as loop indices, in winding order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceData {
    pub loop_indices: Vec<u32>,
    #[serde(default)]
    pub material_index: u8,
}

/// Deformed vertex positions for one timeline frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSample {
    pub frame: i32,
    pub positions: Vec<[f32; 3]>,
}

fn default_true() -> bool {
    true
}

/// Load and structurally validate a scene snapshot.
pub fn load_scene(path: &Path) -> Result<SceneDoc> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene snapshot: {:?}", path))?;
    let scene: SceneDoc = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse scene snapshot: {:?}", path))?;
    validate(&scene).with_context(|| format!("Invalid scene snapshot: {:?}", path))?;
    Ok(scene)
}

/// Structural validation of a scene document.
///
/// Triangularity is deliberately not checked here: face shape is part of the
/// encoder's failure contract, not a document-format concern.
pub fn validate(scene: &SceneDoc) -> Result<()> {
    if scene.frame_end < scene.frame_start {
        bail!(
            "scene frame range {}..{} is empty",
            scene.frame_start,
            scene.frame_end
        );
    }
    let span = scene.frame_end as i64 - scene.frame_start as i64 + 1;
    if span > MAX_ELEMENT_COUNT as i64 {
        bail!("scene frame range spans {} frames, maximum is 65535", span);
    }

    for object in &scene.objects {
        match (&object.kind, &object.mesh) {
            (ObjectKind::Mesh, Some(mesh)) => validate_mesh(mesh)
                .with_context(|| format!("mesh object '{}' is malformed", object.name))?,
            (ObjectKind::Mesh, None) => {
                bail!("mesh object '{}' carries no mesh data", object.name)
            }
            (_, Some(_)) => bail!(
                "non-mesh object '{}' unexpectedly carries mesh data",
                object.name
            ),
            (_, None) => {}
        }
    }
    Ok(())
}

fn validate_mesh(mesh: &MeshData) -> Result<()> {
    if mesh.vertices.len() > MAX_VERTEX_COUNT {
        bail!(
            "{} vertices exceed the animation header range ({} max); split the mesh",
            mesh.vertices.len(),
            MAX_VERTEX_COUNT
        );
    }
    if mesh.faces.len() > MAX_ELEMENT_COUNT {
        bail!(
            "{} faces exceed the u16 header range; split the mesh",
            mesh.faces.len()
        );
    }

    for (i, &vertex_index) in mesh.loops.iter().enumerate() {
        if vertex_index as usize >= mesh.vertices.len() {
            bail!("loop {} references missing vertex {}", i, vertex_index);
        }
    }

    for (i, face) in mesh.faces.iter().enumerate() {
        for &loop_index in &face.loop_indices {
            if loop_index as usize >= mesh.loops.len() {
                bail!("face {} references missing loop {}", i, loop_index);
            }
        }
        // The record stores the material slot as a signed byte
        if face.material_index > i8::MAX as u8 {
            bail!(
                "face {} material index {} exceeds the signed byte range",
                i,
                face.material_index
            );
        }
        if !mesh.materials.is_empty() && face.material_index as usize >= mesh.materials.len() {
            bail!(
                "face {} references missing material slot {}",
                i,
                face.material_index
            );
        }
    }

    if let Some(uv_layer) = &mesh.uv_layer {
        if uv_layer.len() != mesh.loops.len() {
            bail!(
                "UV layer has {} entries for {} loops",
                uv_layer.len(),
                mesh.loops.len()
            );
        }
    }

    for sample in &mesh.frames {
        if sample.positions.len() != mesh.vertices.len() {
            bail!(
                "frame {} has {} positions for {} vertices",
                sample.frame,
                sample.positions.len(),
                mesh.vertices.len()
            );
        }
    }

    Ok(())
}

/// Resolve the single mesh object an export run is allowed to bind.
///
/// Exactly one explicitly selected mesh wins. With nothing selected, a scene
/// containing exactly one selectable mesh is accepted as the obvious intent.
/// Every other condition refuses to bind a mesh.
pub fn resolve_mesh(scene: &SceneDoc) -> Result<&SceneObject, ExportError> {
    let selected: Vec<&SceneObject> = scene.objects.iter().filter(|o| o.selected).collect();

    match selected.as_slice() {
        [] => {
            // Nothing selected; accept a lone selectable mesh
            let mut meshes = scene
                .objects
                .iter()
                .filter(|o| o.selectable && o.kind == ObjectKind::Mesh);
            match (meshes.next(), meshes.next()) {
                (Some(only), None) => Ok(only),
                (None, _) => {
                    tracing::debug!("nothing selected and no selectable mesh in scene");
                    Err(ExportError::NoMeshResolved)
                }
                (Some(_), Some(_)) => {
                    tracing::debug!("nothing selected and several selectable meshes in scene");
                    Err(ExportError::NoMeshResolved)
                }
            }
        }
        [object] => {
            if object.kind == ObjectKind::Mesh {
                Ok(object)
            } else {
                tracing::debug!("selected object '{}' is not a mesh", object.name);
                Err(ExportError::NoMeshResolved)
            }
        }
        _ => {
            tracing::debug!("{} objects selected, at most one allowed", selected.len());
            Err(ExportError::NoMeshResolved)
        }
    }
}
