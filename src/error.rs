use std::path::PathBuf;

/// Errors surfaced by surface setup and by loading frames/config from disk.
///
/// Drawing itself never fails: anything outside the scissor or the surface is
/// dropped at the pixel level.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Unsupported pixel layout tag {0}")]
    UnsupportedLayout(u32),

    #[error("Row pitch {pitch} is smaller than one row of pixels ({min} bytes)")]
    PitchTooSmall { pitch: usize, min: usize },

    #[error("Pixel buffer holds {len} bytes, surface needs {required}")]
    BufferTooSmall { len: usize, required: usize },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = RasterError> = std::result::Result<T, E>;
