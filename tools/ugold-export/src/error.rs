//! Export failure taxonomy
//!
//! Every failure is fatal to the whole export: no retries, no partial
//! output. Callers must treat any non-zero process status as total failure
//! with no consistency guarantee for the output files.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no exportable mesh could be resolved from the scene")]
    NoMeshResolved,

    #[error("face {face} is degenerate ({loops} loops)")]
    DegenerateFace { face: usize, loops: usize },

    #[error("face {face} is not a triangle ({loops} loops)")]
    NonTriangularFace { face: usize, loops: usize },

    #[error("failed to open {path:?} for writing")]
    FileOpenFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Legacy process exit code for this failure class. The consuming
    /// toolchain only distinguishes zero from non-zero, but the codes are
    /// kept stable for scripts that inspect them.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExportError::NoMeshResolved => -3,
            ExportError::DegenerateFace { .. } | ExportError::NonTriangularFace { .. } => -2,
            ExportError::FileOpenFailure { .. } => -1,
        }
    }
}
