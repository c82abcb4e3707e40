//! ObjectDetector: the adapter handle around a detection engine.

use std::path::Path;

use tracing::{debug, error, trace, warn};

use crate::engine::{DetectionEngine, EngineStatus};
use crate::error::DetectorError;
use crate::image::{ImageData, build_frame};
use crate::options::{BaseOptions, ObjectDetectorOptions};
use crate::result::DetectionResult;

/// A constructed detector that owns its engine.
///
/// `detect` takes `&mut self`, so a single detector is never driven from two
/// threads at once. Use one detector per worker for parallel detection.
pub struct ObjectDetector<E: DetectionEngine> {
    engine: E,
    options: ObjectDetectorOptions,
    invalidated: Option<EngineStatus>,
}

impl<E: DetectionEngine> ObjectDetector<E> {
    /// Create a detector from the given options.
    ///
    /// Fails with [`DetectorError::Configuration`] carrying the engine's
    /// diagnostic when the engine rejects the options.
    pub fn create_from_options(options: ObjectDetectorOptions) -> Result<Self, DetectorError> {
        let engine_options = options.to_engine_options();
        debug!(
            model = ?options.base_options.file_name,
            locale = ?engine_options.display_names_locale,
            max_results = ?engine_options.max_results,
            score_threshold = ?engine_options.score_threshold,
            allowlist = engine_options.class_name_allowlist.len(),
            denylist = engine_options.class_name_denylist.len(),
            "creating object detector"
        );

        let engine = E::create_from_options(engine_options).map_err(|status| {
            warn!(%status, "engine rejected detector options");
            DetectorError::Configuration(status)
        })?;

        Ok(Self {
            engine,
            options,
            invalidated: None,
        })
    }

    /// Create a detector for a model file with default detection options.
    pub fn create_from_file(path: impl AsRef<Path>) -> Result<Self, DetectorError> {
        Self::create_from_options(ObjectDetectorOptions::new(BaseOptions::from_file(path)))
    }

    /// Run detection on one image.
    ///
    /// The image is validated into a frame before the engine sees it; a
    /// malformed image fails with [`DetectorError::Input`] without invoking
    /// the engine. The engine's detections are returned as-is.
    pub fn detect(&mut self, image: &ImageData<'_>) -> Result<DetectionResult, DetectorError> {
        if let Some(status) = &self.invalidated {
            return Err(DetectorError::InstanceInvalidated(status.clone()));
        }

        let frame = build_frame(image)?;
        trace!(
            width = frame.width(),
            height = frame.height(),
            format = ?frame.format(),
            "running detection"
        );

        match self.engine.detect(&frame) {
            Ok(result) => {
                trace!(detections = result.len(), "detection finished");
                Ok(result)
            }
            Err(status) if !self.engine.is_usable() => {
                error!(%status, "engine failed and is no longer usable");
                self.invalidated = Some(status.clone());
                Err(DetectorError::InstanceInvalidated(status))
            }
            Err(status) => {
                warn!(%status, "detection failed");
                Err(DetectorError::Detection(status))
            }
        }
    }

    /// The options this detector was created with.
    pub fn options(&self) -> &ObjectDetectorOptions {
        &self.options
    }

    /// Get a reference to the underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Whether an engine failure has made this detector unusable.
    pub fn is_invalidated(&self) -> bool {
        self.invalidated.is_some()
    }
}

impl<E: DetectionEngine> Drop for ObjectDetector<E> {
    fn drop(&mut self) {
        debug!(
            invalidated = self.invalidated.is_some(),
            "releasing object detector"
        );
    }
}

impl<E: DetectionEngine> std::fmt::Debug for ObjectDetector<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectDetector")
            .field("options", &self.options)
            .field("invalidated", &self.invalidated)
            .finish_non_exhaustive()
    }
}
