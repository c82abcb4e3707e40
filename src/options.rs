//! Detector options and their translation into the engine representation.

mod base;
mod detection;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use base::{BaseOptions, ComputeSettings, Delegate, EngineBaseOptions, ExternalFile};
pub use detection::DetectionOptions;

use crate::engine::EngineOptions;
use crate::error::OptionsError;

/// Everything needed to construct an [`ObjectDetector`](crate::ObjectDetector).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectDetectorOptions {
    pub base_options: BaseOptions,
    #[serde(default)]
    pub detection_options: DetectionOptions,
}

impl ObjectDetectorOptions {
    /// Options with the given base options and default detection options.
    pub fn new(base_options: BaseOptions) -> Self {
        Self {
            base_options,
            detection_options: DetectionOptions::default(),
        }
    }

    pub fn with_detection_options(mut self, detection_options: DetectionOptions) -> Self {
        self.detection_options = detection_options;
        self
    }

    /// Parse options from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Translate into the engine-facing option record.
    ///
    /// Optional fields are copied only when present, and the class lists are
    /// copied verbatim, so absent and empty stay distinguishable for the
    /// scalars while the lists are always materialised.
    pub fn to_engine_options(&self) -> EngineOptions {
        let detection = &self.detection_options;
        let mut options = EngineOptions::new(self.base_options.to_engine_options());

        if let Some(locale) = &detection.display_names_locale {
            options.display_names_locale = Some(locale.clone());
        }
        if let Some(max_results) = detection.max_results {
            options.max_results = Some(max_results);
        }
        if let Some(score_threshold) = detection.score_threshold {
            options.score_threshold = Some(score_threshold);
        }
        options
            .class_name_allowlist
            .clone_from(&detection.class_name_allowlist);
        options
            .class_name_denylist
            .clone_from(&detection.class_name_denylist);

        options
    }
}
