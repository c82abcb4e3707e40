//! Detection post-processing options.

use serde::{Deserialize, Serialize};

/// Caller-facing detection options.
///
/// The scalar fields use explicit presence: `None` means "never set" and is
/// not forwarded to the engine, while `Some(0)` or `Some(0.0)` is forwarded
/// like any other value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionOptions {
    /// Locale used for display names, e.g. `"en"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_names_locale: Option<String>,
    /// Upper bound on the number of detections returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    /// Detections scoring below this are dropped by the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f32>,
    /// Only these class names are kept, in the given order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class_name_allowlist: Vec<String>,
    /// These class names are dropped, in the given order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class_name_denylist: Vec<String>,
}

impl DetectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display_names_locale(mut self, locale: impl Into<String>) -> Self {
        self.display_names_locale = Some(locale.into());
        self
    }

    pub fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_score_threshold(mut self, score_threshold: f32) -> Self {
        self.score_threshold = Some(score_threshold);
        self
    }

    pub fn with_allowlist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_name_allowlist = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_denylist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_name_denylist = names.into_iter().map(Into::into).collect();
        self
    }
}
