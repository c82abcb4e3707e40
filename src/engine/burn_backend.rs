//! Burn inference backend for object detection.
//!
//! This module provides a `BurnEngine` that implements `DetectionEngine`
//! for running object detection models built with the Burn framework.
//!
//! # Example
//!
//! ```ignore
//! use object_detector::{BurnEngine, BurnModel, ObjectDetector, RawDetection};
//! use burn::backend::NdArray;
//!
//! // Implement BurnModel for your detection model
//! struct MyYoloModel { /* ... */ }
//!
//! impl BurnModel<NdArray> for MyYoloModel {
//!     fn load(file: &ExternalFile, device: &NdArrayDevice) -> Result<Self, String> { /* ... */ }
//!     fn forward(&self, input: burn::tensor::Tensor<NdArray, 4>) -> Vec<RawDetection> {
//!         // Run inference
//!     }
//!     fn labels(&self) -> &[String] { &self.labels }
//! }
//!
//! let detector = ObjectDetector::<BurnEngine<NdArray, MyYoloModel>>::create_from_file("model.mpk")?;
//! ```

use std::marker::PhantomData;

use burn::prelude::*;
use burn::tensor::Tensor;
use tracing::debug;

use crate::engine::{DetectionEngine, EngineOptions, EngineStatus, StatusCode};
use crate::image::FrameBuffer;
use crate::options::ExternalFile;
use crate::result::{Category, DetectionBuilder, DetectionResult};

/// Score threshold applied when the options don't set one.
const DEFAULT_SCORE_THRESHOLD: f32 = 0.25;

/// Raw detection output from the model.
#[derive(Debug, Clone)]
pub struct RawDetection {
    /// Bounding box: [x1, y1, x2, y2] or [cx, cy, w, h] depending on model
    pub bbox: [f32; 4],
    /// Confidence score
    pub score: f32,
    /// Index into the model's label map
    pub class_id: usize,
}

/// Trait for Burn-based detection models.
///
/// Implement this trait for your specific model architecture.
pub trait BurnModel<B: Backend>: Send + Sync + Sized {
    /// Load the model described by `model_file` onto `device`.
    fn load(model_file: &ExternalFile, device: &B::Device) -> Result<Self, String>;

    /// Run forward pass on the input tensor.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape [batch, channels, height, width]
    ///
    /// # Returns
    /// Vector of raw detections, already suppressed.
    fn forward(&self, input: Tensor<B, 4>) -> Vec<RawDetection>;

    /// Get the expected input size (channels, height, width).
    fn input_size(&self) -> (u32, u32, u32) {
        (3, 640, 640) // Default YOLO input size
    }

    /// Whether bbox output is in XYWH format (vs TLBR).
    fn bbox_is_xywh(&self) -> bool {
        true // Most YOLO variants use XYWH
    }

    /// Class names indexed by `RawDetection::class_id`.
    fn labels(&self) -> &[String];

    /// Localized display names for `locale`, indexed like `labels`.
    fn display_names(&self, _locale: &str) -> Option<&[String]> {
        None
    }
}

/// Burn-based object detection engine implementing `DetectionEngine`.
pub struct BurnEngine<B: Backend, M: BurnModel<B>> {
    model: M,
    device: B::Device,
    score_threshold: f32,
    max_results: Option<usize>,
    allowlist: Vec<String>,
    denylist: Vec<String>,
    display_names: Option<Vec<String>>,
    _backend: PhantomData<B>,
}

impl<B: Backend, M: BurnModel<B>> BurnEngine<B, M> {
    fn validate(options: &EngineOptions) -> Result<(), EngineStatus> {
        if options.base_options.model_file.is_unspecified() {
            return Err(EngineStatus::invalid_argument(
                "ExternalFile must specify at least one of 'file_content', 'file_name' or \
                 'file_descriptor_meta'.",
            ));
        }
        if !options.class_name_allowlist.is_empty() && !options.class_name_denylist.is_empty() {
            return Err(EngineStatus::invalid_argument(
                "`class_name_whitelist` and `class_name_blacklist` are mutually exclusive options.",
            ));
        }
        if options.max_results == Some(0) {
            return Err(EngineStatus::invalid_argument(
                "Invalid `max_results` option: value must be != 0",
            ));
        }
        if let Some(threads) = options.base_options.compute.num_threads {
            if threads == 0 || threads < -1 {
                return Err(EngineStatus::invalid_argument(
                    "`num_threads` must be greater than 0 or equal to -1.",
                ));
            }
        }
        Ok(())
    }

    /// Convert a frame to a normalized [1, C, H, W] tensor.
    fn preprocess(&self, frame: &FrameBuffer<'_>) -> Result<Tensor<B, 4>, EngineStatus> {
        let (channels, target_h, target_w) = self.model.input_size();
        let frame_channels = frame.format().channels();

        if frame_channels != channels as usize {
            return Err(EngineStatus::invalid_argument(format!(
                "Model expects {} channels, got a {:?} frame.",
                channels,
                frame.format()
            )));
        }
        if frame.height() != target_h || frame.width() != target_w {
            return Err(EngineStatus::new(
                StatusCode::Unimplemented,
                format!(
                    "Input size {}x{} doesn't match model size {}x{}. Resize not implemented.",
                    frame.width(),
                    frame.height(),
                    target_w,
                    target_h
                ),
            ));
        }

        // Interleaved HWC bytes to planar CHW floats in [0, 1]
        let (height, width) = (frame.height() as usize, frame.width() as usize);
        let pixels = frame.data();
        let mut data = Vec::with_capacity(pixels.len());
        for c in 0..frame_channels {
            for y in 0..height {
                let row = y * frame.stride();
                for x in 0..width {
                    data.push(pixels[row + x * frame_channels + c] as f32 / 255.0);
                }
            }
        }

        Ok(
            Tensor::<B, 1>::from_floats(data.as_slice(), &self.device).reshape([
                1,
                frame_channels,
                height,
                width,
            ]),
        )
    }

    /// Apply score threshold, class filters, ordering and the result cap.
    fn postprocess(&self, raw_detections: Vec<RawDetection>) -> DetectionResult {
        let labels = self.model.labels();
        let mut kept: Vec<RawDetection> = raw_detections
            .into_iter()
            .filter(|d| d.score >= self.score_threshold)
            .filter(|d| {
                let name = labels.get(d.class_id).map(String::as_str).unwrap_or("");
                if !self.allowlist.is_empty() {
                    return self.allowlist.iter().any(|allowed| allowed == name);
                }
                !self.denylist.iter().any(|denied| denied == name)
            })
            .collect();

        kept.sort_by(|a, b| b.score.total_cmp(&a.score));
        if let Some(max_results) = self.max_results {
            kept.truncate(max_results);
        }

        let detections = kept
            .into_iter()
            .map(|d| {
                let class_name = labels.get(d.class_id).cloned().unwrap_or_default();
                let display_name = self
                    .display_names
                    .as_ref()
                    .and_then(|names| names.get(d.class_id).cloned())
                    .unwrap_or_default();
                let category = Category::new(d.class_id as i32, d.score, class_name)
                    .with_display_name(display_name);

                let builder = DetectionBuilder::new().class(category);
                let builder = if self.model.bbox_is_xywh() {
                    builder.xywh(d.bbox[0], d.bbox[1], d.bbox[2], d.bbox[3])
                } else {
                    builder.tlbr(d.bbox[0], d.bbox[1], d.bbox[2], d.bbox[3])
                };
                builder.build()
            })
            .collect();

        DetectionResult::new(detections)
    }
}

impl<B: Backend, M: BurnModel<B>> DetectionEngine for BurnEngine<B, M> {
    fn create_from_options(options: EngineOptions) -> Result<Self, EngineStatus> {
        Self::validate(&options)?;

        let device = B::Device::default();
        let model = M::load(&options.base_options.model_file, &device)
            .map_err(EngineStatus::invalid_argument)?;

        let display_names = match &options.display_names_locale {
            Some(locale) => match model.display_names(locale) {
                Some(names) => Some(names.to_vec()),
                None => {
                    return Err(EngineStatus::invalid_argument(format!(
                        "Unsupported display names locale: '{locale}'"
                    )));
                }
            },
            None => None,
        };

        debug!(
            labels = model.labels().len(),
            input_size = ?model.input_size(),
            "loaded burn detection model"
        );

        Ok(Self {
            model,
            device,
            score_threshold: options.score_threshold.unwrap_or(DEFAULT_SCORE_THRESHOLD),
            // Negative values mean "no limit"
            max_results: options
                .max_results
                .and_then(|n| usize::try_from(n).ok()),
            allowlist: options.class_name_allowlist,
            denylist: options.class_name_denylist,
            display_names,
            _backend: PhantomData,
        })
    }

    fn detect(&mut self, frame: &FrameBuffer<'_>) -> Result<DetectionResult, EngineStatus> {
        let tensor = self.preprocess(frame)?;
        let raw_detections = self.model.forward(tensor);
        Ok(self.postprocess(raw_detections))
    }
}
