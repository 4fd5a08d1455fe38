use cube_stitch_core::prelude::*;

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, StitchError>;

/// Everything that can abort a stitching run. None of these are recovered from; the caller is expected to stop.
#[derive(Debug, thiserror::Error)]
pub enum StitchError {
    #[error("failed to read manifest {path:?}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse manifest")]
    ManifestParse(#[source] serde_json::Error),

    #[error("invalid manifest field `{field}`: {reason}")]
    InvalidManifest { field: &'static str, reason: String },

    #[error("failed to parse point stream header")]
    SurfaceHeader(#[source] serde_json::Error),

    #[error("failed to read point stream")]
    SurfaceRead(#[source] io::Error),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("failed to open fragment {path:?}")]
    FragmentOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("fragment {path:?} holds {len} bytes, but {expected} are required")]
    FragmentTooSmall {
        path: PathBuf,
        len: u64,
        expected: u64,
    },

    #[error("offset {offset:?} is outside of fragment {key}")]
    OffsetOutOfBounds {
        key: FragmentKey,
        offset: LocalOffset,
    },

    #[error("failed to write output")]
    Output(#[source] io::Error),
}
