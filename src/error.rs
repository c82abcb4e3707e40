//! Error types surfaced by the detector adapter.

use thiserror::Error;

use crate::engine::EngineStatus;

/// Errors returned by [`ObjectDetector`](crate::ObjectDetector).
///
/// Variants that originate in the engine carry its [`EngineStatus`]
/// untouched, so the diagnostic text reaches the caller verbatim.
#[derive(Debug, Clone, Error)]
pub enum DetectorError {
    /// The engine rejected the detector configuration.
    #[error("configuration error: {0}")]
    Configuration(EngineStatus),

    /// The image could not be turned into a frame.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// The engine failed while running detection.
    #[error("detection error: {0}")]
    Detection(EngineStatus),

    /// The engine reported that the instance can no longer be used.
    #[error("detector instance invalidated: {0}")]
    InstanceInvalidated(EngineStatus),
}

impl DetectorError {
    /// The engine diagnostic behind this error, if it came from the engine.
    pub fn status(&self) -> Option<&EngineStatus> {
        match self {
            Self::Configuration(status)
            | Self::Detection(status)
            | Self::InstanceInvalidated(status) => Some(status),
            Self::Input(_) => None,
        }
    }
}

/// Malformed or unsupported image input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("image has zero size: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// `expected` is `usize::MAX` when `width * height * channels` overflows.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("unsupported image shape {0:?}")]
    UnsupportedShape(Vec<usize>),

    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(usize),

    #[error("failed to decode image: {0}")]
    Decode(String),
}

/// Failures while loading detector options from JSON.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}
