//! Geometry encoder (rest-pose mesh → `_d.3d` payload)
//!
//! Walks the mesh's faces in host order and emits the 48-byte header plus
//! one 16-byte record per triangle. The first structural violation aborts
//! the whole export; nothing is emitted for a rejected mesh.

use ugold_common::{quantize_uv_pair, DataHeader, MeshTri};

use crate::error::ExportError;
use crate::scene::MeshData;

/// Encode the geometry file payload for a validated mesh.
pub fn encode_geometry(mesh: &MeshData) -> Result<Vec<u8>, ExportError> {
    let header = DataHeader::new(mesh.faces.len() as u16, mesh.vertices.len() as u16);
    tracing::debug!(
        "mesh has {} tris, {} verts",
        header.triangle_count,
        header.vertex_count
    );

    let mut data = Vec::with_capacity(header.file_size());
    data.extend_from_slice(&header.to_bytes());

    for (face_index, face) in mesh.faces.iter().enumerate() {
        let loops = face.loop_indices.len();
        if loops < 3 {
            return Err(ExportError::DegenerateFace {
                face: face_index,
                loops,
            });
        }
        if loops != 3 {
            return Err(ExportError::NonTriangularFace {
                face: face_index,
                loops,
            });
        }

        let mut vertices = [0u16; 3];
        let mut uvs = [[0u8; 2]; 3];
        for (corner, &loop_index) in face.loop_indices.iter().enumerate() {
            vertices[corner] = mesh.loops[loop_index as usize] as u16;
            if let Some(uv_layer) = &mesh.uv_layer {
                uvs[corner] = quantize_uv_pair(uv_layer[loop_index as usize]);
            }
        }

        let tri = MeshTri {
            vertices,
            kind: 0,
            uvs,
            material: face.material_index as i8,
        };
        data.extend_from_slice(&tri.to_bytes());
    }

    Ok(data)
}
