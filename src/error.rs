//! Error types for scene decoding.

use thiserror::Error;

/// Errors that can occur while decoding a scene description.
///
/// Unknown keywords are not errors; the decoder warns and keeps going.
/// Everything here aborts the run: the pipeline is one-shot, with no
/// retries.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The token stream ended in the middle of a keyword's fields.
    #[error("unexpected end of input while reading fields of {0}")]
    UnexpectedEof(&'static str),

    /// A field that should be numeric failed to parse.
    #[error("invalid numeric field {token:?} for {keyword}")]
    InvalidNumber {
        /// Keyword whose field was being read.
        keyword: &'static str,
        /// The offending token.
        token: String,
    },

    /// CAMERA_FOV_X appeared before DIMENSIONS; the vertical FOV is
    /// derived from the aspect ratio, so the dimensions must be known.
    #[error("CAMERA_FOV_X requires DIMENSIONS to be read first")]
    FovBeforeDimensions,

    /// Reading the scene file failed.
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for scene decoding.
pub type Result<T> = std::result::Result<T, SceneError>;
