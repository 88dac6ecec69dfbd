//! ugold-export library
//!
//! Provides the export pipeline for use by other tools and the integration
//! tests: scene snapshot model, geometry encoder, animation quantizer,
//! script generation, and manifest-driven batch builds.

pub mod animation;
pub mod error;
pub mod export;
pub mod manifest;
pub mod mesh;
pub mod scene;
pub mod script;
pub mod timeline;

// Re-export the encoding entry points
pub use animation::{encode_animation, FrameRange};
pub use error::ExportError;
pub use export::{export_scene, write_bundle, ExportBundle, ExportConfig};
pub use mesh::encode_geometry;
pub use scene::{load_scene, resolve_mesh, MeshData, SceneDoc};
pub use script::generate_script;
pub use timeline::{BakedTimeline, MeshSnapshot, Timeline};
