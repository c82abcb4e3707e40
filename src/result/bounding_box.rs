//! Pixel-space bounding boxes.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel coordinates of the input image.
///
/// Stored as TLWH: the top-left origin plus width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Top-left x coordinate
    pub origin_x: i32,
    /// Top-left y coordinate
    pub origin_y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    /// Create a new box from its origin and dimensions (TLWH format).
    #[inline]
    pub fn new(origin_x: i32, origin_y: i32, width: i32, height: i32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    /// Create a box from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    ///
    /// Dimensions saturate at `i32::MAX` instead of overflowing.
    #[inline]
    pub fn from_tlbr(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            origin_x: x1,
            origin_y: y1,
            width: x2.saturating_sub(x1),
            height: y2.saturating_sub(y1),
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [i32; 4] {
        [
            self.origin_x,
            self.origin_y,
            self.origin_x.saturating_add(self.width),
            self.origin_y.saturating_add(self.height),
        ]
    }

    /// Area in pixels; degenerate boxes have zero area.
    #[inline]
    pub fn area(&self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }
}
