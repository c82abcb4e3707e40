use std::cell::Cell;

use ndarray::{Array, IxDyn};
use object_detector::{
    BaseOptions, Category, Detection, DetectionEngine, DetectionOptions, DetectionResult,
    DetectorError, EngineOptions, EngineStatus, FrameBuffer, ImageData, InputError,
    ObjectDetector, ObjectDetectorOptions, PixelFormat, StatusCode,
};

thread_local! {
    static RELEASED: Cell<usize> = const { Cell::new(0) };
}

fn released() -> usize {
    RELEASED.with(Cell::get)
}

/// Engine whose behaviour is selected by the model file name.
struct ScriptedEngine {
    options: EngineOptions,
    model: String,
    calls: usize,
    usable: bool,
}

impl ScriptedEngine {
    fn raw_detections() -> Vec<(i32, f32, &'static str)> {
        vec![
            (16, 0.6, "cat"),
            (17, 0.9, "dog"),
            (16, 0.7, "cat"),
            (1, 0.55, "bicycle"),
            (17, 0.3, "dog"),
        ]
    }
}

impl DetectionEngine for ScriptedEngine {
    fn create_from_options(options: EngineOptions) -> Result<Self, EngineStatus> {
        if options.base_options.model_file.is_unspecified() {
            return Err(EngineStatus::invalid_argument(
                "ExternalFile must specify at least one of 'file_content', 'file_name' or \
                 'file_descriptor_meta'.",
            ));
        }
        if let Some(locale) = &options.display_names_locale {
            if locale != "en" && locale != "fr" {
                return Err(EngineStatus::invalid_argument(format!(
                    "Unsupported display names locale: '{locale}'"
                )));
            }
        }

        let model = options
            .base_options
            .model_file
            .file_name
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "in-memory".to_string());

        Ok(Self {
            options,
            model,
            calls: 0,
            usable: true,
        })
    }

    fn detect(&mut self, frame: &FrameBuffer<'_>) -> Result<DetectionResult, EngineStatus> {
        self.calls += 1;
        match self.model.as_str() {
            "empty.tflite" => Ok(DetectionResult::default()),
            "flaky.tflite" if self.calls % 2 == 1 => Err(EngineStatus::new(
                StatusCode::ResourceExhausted,
                "arena allocation failed",
            )),
            "crashing.tflite" => {
                self.usable = false;
                Err(EngineStatus::internal("delegate lost its context"))
            }
            _ => {
                let threshold = self.options.score_threshold.unwrap_or(0.0);
                let limit = self
                    .options
                    .max_results
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(usize::MAX);
                let w = frame.width() as i32;
                let detections = Self::raw_detections()
                    .into_iter()
                    .filter(|(_, score, _)| *score >= threshold)
                    .take(limit)
                    .enumerate()
                    .map(|(i, (index, score, name))| Detection {
                        bounding_box: object_detector::BoundingBox::new(i as i32, 0, w / 2, 10),
                        classes: vec![Category::new(index, score, name)],
                    })
                    .collect();
                Ok(DetectionResult::new(detections))
            }
        }
    }

    fn is_usable(&self) -> bool {
        self.usable
    }
}

impl Drop for ScriptedEngine {
    fn drop(&mut self) {
        RELEASED.with(|r| r.set(r.get() + 1));
    }
}

type Detector = ObjectDetector<ScriptedEngine>;

fn create(model: &str, detection_options: DetectionOptions) -> Result<Detector, DetectorError> {
    Detector::create_from_options(
        ObjectDetectorOptions::new(BaseOptions::from_file(model))
            .with_detection_options(detection_options),
    )
}

fn rgb_image(width: u32, height: u32) -> ImageData<'static> {
    let len = (width * height * 3) as usize;
    ImageData::new(width, height, PixelFormat::Rgb8, vec![0u8; len])
}

#[test]
fn test_options_reach_engine_unchanged() {
    let cases = [
        DetectionOptions::new(),
        DetectionOptions::new().with_max_results(3),
        DetectionOptions::new().with_score_threshold(0.0),
        DetectionOptions::new().with_display_names_locale("fr"),
        DetectionOptions::new()
            .with_display_names_locale("en")
            .with_max_results(-1)
            .with_score_threshold(0.25)
            .with_allowlist(["dog", "cat"])
            .with_denylist(["person"]),
    ];

    for detection_options in cases {
        let detector = create("m.tflite", detection_options.clone()).unwrap();
        let engine = &detector.engine().options;

        assert_eq!(
            engine.display_names_locale,
            detection_options.display_names_locale
        );
        assert_eq!(engine.max_results, detection_options.max_results);
        assert_eq!(engine.score_threshold, detection_options.score_threshold);
        assert_eq!(
            engine.class_name_allowlist,
            detection_options.class_name_allowlist
        );
        assert_eq!(
            engine.class_name_denylist,
            detection_options.class_name_denylist
        );
        assert_eq!(detector.options().detection_options, detection_options);
    }
}

#[test]
fn test_empty_lists_stay_empty() {
    let detector = create("m.tflite", DetectionOptions::new()).unwrap();
    let engine = &detector.engine().options;
    assert_eq!(engine.class_name_allowlist, Vec::<String>::new());
    assert_eq!(engine.class_name_denylist, Vec::<String>::new());
}

#[test]
fn test_malformed_images_never_reach_engine() {
    let mut detector = create("m.tflite", DetectionOptions::new()).unwrap();

    let zero = ImageData::new(0, 0, PixelFormat::Rgb8, Vec::<u8>::new());
    assert!(matches!(
        detector.detect(&zero),
        Err(DetectorError::Input(InputError::EmptyImage { .. }))
    ));

    let short = ImageData::new(640, 480, PixelFormat::Rgba8, vec![0u8; 640 * 480 * 3]);
    assert!(matches!(
        detector.detect(&short),
        Err(DetectorError::Input(InputError::BufferSizeMismatch { .. }))
    ));

    assert_eq!(detector.engine().calls, 0);
}

#[test]
fn test_zero_detections_is_success() {
    let mut detector = create("empty.tflite", DetectionOptions::new()).unwrap();
    let result = detector.detect(&rgb_image(8, 8)).unwrap();
    assert!(result.is_empty());
    assert_eq!(detector.engine().calls, 1);
}

#[test]
fn test_repeated_detect_is_deterministic() {
    let mut detector = create("m.tflite", DetectionOptions::new()).unwrap();
    let image = rgb_image(64, 48);

    let first = detector.detect(&image).unwrap();
    let second = detector.detect(&image).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unsupported_locale_fails_construction() {
    let before = released();
    let err = create(
        "m.tflite",
        DetectionOptions::new().with_display_names_locale("tlh"),
    )
    .unwrap_err();

    match err {
        DetectorError::Configuration(status) => {
            assert_eq!(status.code, StatusCode::InvalidArgument);
            assert_eq!(status.message(), "Unsupported display names locale: 'tlh'");
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
    // no engine was constructed, so nothing was released
    assert_eq!(released(), before);
}

#[test]
fn test_max_results_and_threshold_keep_engine_order() {
    let mut detector = create(
        "m.tflite",
        DetectionOptions::new()
            .with_max_results(3)
            .with_score_threshold(0.5),
    )
    .unwrap();
    let result = detector.detect(&rgb_image(640, 480)).unwrap();

    assert!(result.len() <= 3);
    let scores: Vec<f32> = result.iter().map(|d| d.classes[0].score).collect();
    assert!(scores.iter().all(|&s| s >= 0.5));
    assert_eq!(scores, vec![0.6, 0.9, 0.7]);
    assert_eq!(result.detections[1].bounding_box.width, 320);
}

#[test]
fn test_empty_model_path_error_is_verbatim() {
    let err = Detector::create_from_file("").unwrap_err();
    let status = err.status().expect("engine status");
    assert_eq!(
        status.to_string(),
        "INVALID_ARGUMENT: ExternalFile must specify at least one of 'file_content', \
         'file_name' or 'file_descriptor_meta'."
    );
}

#[test]
fn test_create_from_model_content() {
    let detector = Detector::create_from_options(ObjectDetectorOptions::new(
        BaseOptions::from_content(vec![0x54, 0x46, 0x4c, 0x33]),
    ))
    .unwrap();
    assert_eq!(detector.engine().model, "in-memory");
}

#[test]
fn test_failed_detect_keeps_instance_usable() {
    let mut detector = create("flaky.tflite", DetectionOptions::new()).unwrap();
    let image = rgb_image(16, 16);

    let err = detector.detect(&image).unwrap_err();
    match &err {
        DetectorError::Detection(status) => {
            assert_eq!(status.code, StatusCode::ResourceExhausted);
            assert_eq!(status.message(), "arena allocation failed");
        }
        other => panic!("expected detection error, got {other:?}"),
    }
    assert!(!detector.is_invalidated());

    let result = detector.detect(&image).unwrap();
    assert_eq!(result.len(), 5);
}

#[test]
fn test_unusable_engine_invalidates_instance() {
    let mut detector = create("crashing.tflite", DetectionOptions::new()).unwrap();
    let image = rgb_image(16, 16);

    assert!(matches!(
        detector.detect(&image),
        Err(DetectorError::InstanceInvalidated(_))
    ));
    assert!(matches!(
        detector.detect(&image),
        Err(DetectorError::InstanceInvalidated(_))
    ));
    assert_eq!(detector.engine().calls, 1);
}

#[test]
fn test_engine_released_on_drop() {
    let before = released();
    {
        let mut detector = create("crashing.tflite", DetectionOptions::new()).unwrap();
        let _ = detector.detect(&rgb_image(4, 4));
    }
    assert_eq!(released(), before + 1);
}

#[test]
fn test_detect_array_backed_image() {
    let mut detector = create("m.tflite", DetectionOptions::new().with_max_results(2)).unwrap();
    let array = Array::<u8, _>::zeros(IxDyn(&[1, 48, 64, 3]));
    let image = ImageData::from_array(array.view()).unwrap();

    let result = detector.detect(&image).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result.detections[0].bounding_box.width, 32);
}

#[test]
fn test_options_from_json() {
    let options = ObjectDetectorOptions::from_json_str(
        r#"{
            "base_options": {"file_name": "m.tflite"},
            "detection_options": {"score_threshold": 0.5, "class_name_allowlist": ["cat"]}
        }"#,
    )
    .unwrap();
    let detector = Detector::create_from_options(options).unwrap();

    let engine = &detector.engine().options;
    assert_eq!(engine.score_threshold, Some(0.5));
    assert_eq!(engine.max_results, None);
    assert_eq!(engine.class_name_allowlist, vec!["cat"]);
}
