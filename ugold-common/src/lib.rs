//! Shared formats and quantization for the ugold vertex-mesh pipeline
//!
//! This crate provides the precision-critical pieces shared between
//! `ugold-export` (asset pipeline) and format inspection tooling:
//!
//! # Modules
//!
//! - [`packing`] - Fixed-point quantization (f32 → masked 11/11/10-bit
//!   fields, f32 UV → truncated byte)
//! - [`formats`] - The legacy geometry/animation file layouts

pub mod formats;
pub mod packing;

// Re-export commonly used packing items
pub use packing::{
    pack_frame_positions, pack_vertex_position, quantize_axis_xy, quantize_axis_z, quantize_uv,
    quantize_uv_pair, unpack_vertex_position, XY_BITS, XY_GRID, XY_MASK, Y_SHIFT, Z_BITS, Z_GRID,
    Z_MASK, Z_SHIFT,
};

// Re-export commonly used format items
pub use formats::{
    aniv_file_path, data_file_path, script_file_path, AnivHeader, DataHeader, MeshTri,
    ANIV_SUFFIX, DATA_SUFFIX, SAMPLE_SIZE, SCRIPT_SUFFIX,
};
