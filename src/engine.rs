//! The seam between the adapter and a detection engine.
//!
//! Any engine that can be built from [`EngineOptions`] and run on a
//! [`FrameBuffer`] can be driven by [`ObjectDetector`](crate::ObjectDetector).

use std::fmt;

use thiserror::Error;

use crate::image::FrameBuffer;
use crate::options::EngineBaseOptions;
use crate::result::DetectionResult;

#[cfg(feature = "burn-backend")]
mod burn_backend;

#[cfg(feature = "burn-backend")]
pub use burn_backend::{BurnEngine, BurnModel, RawDetection};

/// Engine-facing detector options.
///
/// The scalar detection fields are `None` when the caller never set them,
/// letting the engine apply its own default. The class lists are always
/// present and possibly empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOptions {
    pub base_options: EngineBaseOptions,
    pub display_names_locale: Option<String>,
    pub max_results: Option<i32>,
    pub score_threshold: Option<f32>,
    pub class_name_allowlist: Vec<String>,
    pub class_name_denylist: Vec<String>,
}

impl EngineOptions {
    /// Options carrying only the base options.
    pub fn new(base_options: EngineBaseOptions) -> Self {
        Self {
            base_options,
            ..Self::default()
        }
    }
}

/// Canonical status codes reported by engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Unknown,
    InvalidArgument,
    NotFound,
    FailedPrecondition,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    ResourceExhausted,
    Aborted,
    DataLoss,
}

impl StatusCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NotFound => "NOT_FOUND",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
            Self::Unavailable => "UNAVAILABLE",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::Aborted => "ABORTED",
            Self::DataLoss => "DATA_LOSS",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure reported by an engine: a status code and its diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct EngineStatus {
    pub code: StatusCode,
    pub message: String,
}

impl EngineStatus {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(StatusCode::InvalidArgument, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::Internal, message)
    }

    /// The engine's diagnostic, exactly as reported.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Trait for object detection engines.
///
/// Implement this trait to drive any detection engine through
/// [`ObjectDetector`](crate::ObjectDetector). The engine owns its native
/// resources and releases them when dropped.
///
/// # Example
///
/// ```ignore
/// use object_detector::{DetectionEngine, DetectionResult, EngineOptions, EngineStatus, FrameBuffer};
///
/// struct MyEngine {
///     // Your model here
/// }
///
/// impl DetectionEngine for MyEngine {
///     fn create_from_options(options: EngineOptions) -> Result<Self, EngineStatus> {
///         // Load the model described by options.base_options
///         Ok(MyEngine {})
///     }
///
///     fn detect(&mut self, frame: &FrameBuffer<'_>) -> Result<DetectionResult, EngineStatus> {
///         // Run inference and return detections
///         Ok(DetectionResult::default())
///     }
/// }
/// ```
pub trait DetectionEngine: Sized {
    /// Build an engine, rejecting unsupported or inconsistent options.
    fn create_from_options(options: EngineOptions) -> Result<Self, EngineStatus>;

    /// Run detection on a validated frame.
    fn detect(&mut self, frame: &FrameBuffer<'_>) -> Result<DetectionResult, EngineStatus>;

    /// Whether the engine can still serve `detect` calls.
    ///
    /// Checked after a failed `detect`; returning `false` permanently
    /// invalidates the wrapping detector.
    fn is_usable(&self) -> bool {
        true
    }
}
