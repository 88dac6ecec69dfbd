//! Legacy vertex-mesh asset formats
//!
//! These are POD formats for the fixed external toolchain: a geometry data
//! file, a vertex animation file, and a text script stub binding the two.
//! No magic bytes - the importer determines the format from the file suffix.
//!
//! All three outputs share one base path; the suffix constants below are the
//! single source of truth for the name variants.

pub mod animation;
pub mod mesh;

pub use animation::*;
pub use mesh::*;

use std::path::{Path, PathBuf};

/// Suffix of the geometry data file
pub const DATA_SUFFIX: &str = "_d.3d";
/// Suffix of the vertex animation file
pub const ANIV_SUFFIX: &str = "_a.3d";
/// Suffix of the generated script stub
pub const SCRIPT_SUFFIX: &str = ".uc";

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Path of the geometry data file for a given base path
pub fn data_file_path(base: &Path) -> PathBuf {
    with_suffix(base, DATA_SUFFIX)
}

/// Path of the vertex animation file for a given base path
pub fn aniv_file_path(base: &Path) -> PathBuf {
    with_suffix(base, ANIV_SUFFIX)
}

/// Path of the script stub for a given base path
pub fn script_file_path(base: &Path) -> PathBuf {
    with_suffix(base, SCRIPT_SUFFIX)
}
