//! Object detection adapter.
//!
//! `ObjectDetector` wraps any [`DetectionEngine`] behind a narrow
//! `create_from_options` / `detect` interface. Options are translated into
//! the engine's representation once, images are validated into frames before
//! they reach the engine, and every engine failure is surfaced with its
//! original diagnostic.
//!
//! ```ignore
//! use object_detector::{BaseOptions, DetectionOptions, ImageData, ObjectDetector, ObjectDetectorOptions};
//!
//! let options = ObjectDetectorOptions::new(BaseOptions::from_file("model.tflite"))
//!     .with_detection_options(DetectionOptions::new().with_max_results(3).with_score_threshold(0.5));
//! let mut detector = ObjectDetector::<MyEngine>::create_from_options(options)?;
//!
//! let image = ImageData::from_file("cats_and_dogs.jpg")?;
//! for detection in detector.detect(&image)?.iter() {
//!     println!("{:?}", detection);
//! }
//! ```

pub mod detector;
pub mod engine;
pub mod error;
pub mod image;
pub mod options;
pub mod result;

pub use detector::ObjectDetector;
pub use engine::{DetectionEngine, EngineOptions, EngineStatus, StatusCode};
pub use error::{DetectorError, InputError, OptionsError};
pub use crate::image::{FrameBuffer, ImageData, PixelFormat, build_frame};
pub use options::{
    BaseOptions, ComputeSettings, Delegate, DetectionOptions, EngineBaseOptions, ExternalFile,
    ObjectDetectorOptions,
};
pub use result::{BoundingBox, Category, Detection, DetectionBuilder, DetectionResult};

#[cfg(feature = "burn-backend")]
pub use engine::{BurnEngine, BurnModel, RawDetection};
