//! Builder for creating Detection objects from various box formats.

use crate::result::{BoundingBox, Category, Detection};

/// Builder for creating `Detection` objects.
///
/// Coordinates are given in floating point pixels and rounded to the nearest
/// integer when the detection is built.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    classes: Vec<Category>,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.x1 = cx - w / 2.0;
        self.y1 = cy - h / 2.0;
        self.x2 = cx + w / 2.0;
        self.y2 = cy + h / 2.0;
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, l: f32, t: f32, w: f32, h: f32) -> Self {
        self.x1 = l;
        self.y1 = t;
        self.x2 = l + w;
        self.y2 = t + h;
        self
    }

    /// Append a class candidate.
    pub fn class(mut self, category: Category) -> Self {
        self.classes.push(category);
        self
    }

    /// Append a class candidate from its index, score and name.
    pub fn category(self, index: i32, score: f32, class_name: impl Into<String>) -> Self {
        self.class(Category::new(index, score, class_name))
    }

    /// Build the final `Detection`.
    ///
    /// Coordinates outside the `i32` range are clamped.
    pub fn build(self) -> Detection {
        let x1 = self.x1.round() as i32;
        let y1 = self.y1.round() as i32;
        let x2 = self.x2.round() as i32;
        let y2 = self.y2.round() as i32;

        Detection {
            bounding_box: BoundingBox::from_tlbr(x1, y1, x2, y2),
            classes: self.classes,
        }
    }
}
