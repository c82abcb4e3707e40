//! Detection results returned to the caller.

mod bounding_box;
mod builder;

use serde::{Deserialize, Serialize};

pub use bounding_box::BoundingBox;
pub use builder::DetectionBuilder;

/// One (label, score) candidate for a detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    /// Index of the class in the model's label map.
    pub index: i32,
    pub score: f32,
    /// Localized label, empty when the model has none for the locale.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class_name: String,
}

impl Category {
    pub fn new(index: i32, score: f32, class_name: impl Into<String>) -> Self {
        Self {
            index,
            score,
            display_name: String::new(),
            class_name: class_name.into(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }
}

/// A located object together with its class candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub classes: Vec<Category>,
}

impl Detection {
    /// The first (highest ranked) class candidate.
    pub fn top_class(&self) -> Option<&Category> {
        self.classes.first()
    }
}

/// Ordered detections produced by one `detect` call.
///
/// An empty result is a successful detection that found nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(default)]
    pub detections: Vec<Detection>,
}

impl DetectionResult {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.detections.iter()
    }

    /// Serialize with the camelCase field names used by the protobuf JSON mapping.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl IntoIterator for DetectionResult {
    type Item = Detection;
    type IntoIter = std::vec::IntoIter<Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.into_iter()
    }
}

impl<'a> IntoIterator for &'a DetectionResult {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.iter()
    }
}
