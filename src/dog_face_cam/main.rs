use crate::config::{CameraChoice, ClassifierChoice, Config, DisplayChoice};
use crate::device_camera::impl_fake::DeviceCameraFake;
#[cfg(feature = "camera-v4l")]
use crate::device_camera::impl_v4l::DeviceCameraV4l;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::impl_console::DeviceDisplayConsole;
use crate::device_display::impl_gui::DeviceDisplayGui;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_classifier::impl_tract::{ImageClassifierTract, ModelLoadError};
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_classifier::labels::LabelTable;
use crate::library::latest_slot::LatestSlot;
use crate::library::logger::interface::Logger;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

/// Anything that keeps the pipeline from coming up. All of these are
/// fatal: the caller reports them and exits, there is no degraded mode.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to read label file {path}")]
    LabelFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),
    #[error("model emits {expected} classes but the label file names {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },
    #[error("camera failed to start: {0}")]
    Camera(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("display failed to start: {0}")]
    Display(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("could not spawn the inference thread: {0}")]
    Worker(#[source] std::io::Error),
}

pub struct DogFaceCam {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    pub labels: Arc<LabelTable>,
    pub results: Arc<LatestSlot<Classification>>,
    pub shutdown: Arc<AtomicBool>,
}

impl DogFaceCam {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        labels: Arc<LabelTable>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("app"),
            device_camera,
            device_display,
            image_classifier,
            labels,
            results: Arc::new(LatestSlot::new()),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Builds every device the config names and validates the model
    /// artifacts against each other. Runs before any thread starts, so
    /// a bad path or a mismatched label file fails the process here.
    pub fn bootstrap(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, StartupError> {
        let labels = Arc::new(load_labels(&config.labels_path)?);
        let image_classifier = build_classifier(&config, &labels)?;
        check_label_count(image_classifier.as_ref(), &labels)?;
        let device_camera = build_camera(&config, &logger);
        let device_display = build_display(&config);

        Ok(Self::new(
            config,
            logger,
            device_camera,
            device_display,
            image_classifier,
            labels,
        ))
    }
}

fn load_labels(path: &str) -> Result<LabelTable, StartupError> {
    LabelTable::load(Path::new(path)).map_err(|source| StartupError::LabelFile {
        path: path.to_string(),
        source,
    })
}

fn build_classifier(
    config: &Config,
    labels: &LabelTable,
) -> Result<Arc<dyn ImageClassifier + Send + Sync>, StartupError> {
    match &config.classifier {
        ClassifierChoice::Fake {
            class_count,
            top_class,
            simulated_latency,
        } => {
            let count = class_count.unwrap_or(labels.len());
            let mut classifier =
                ImageClassifierFake::new(count).with_simulated_latency(*simulated_latency);
            if let Some(top) = top_class {
                classifier = classifier.with_top_class(*top);
            }
            Ok(Arc::new(classifier))
        }
        ClassifierChoice::Onnx(model_config) => {
            Ok(Arc::new(ImageClassifierTract::new(model_config)?))
        }
    }
}

/// The model's declared output width must cover exactly the names we
/// loaded, otherwise some winning index would have no name to show.
pub fn check_label_count(
    classifier: &dyn ImageClassifier,
    labels: &LabelTable,
) -> Result<(), StartupError> {
    match classifier.num_classes() {
        Some(expected) if expected != labels.len() => Err(StartupError::LabelCountMismatch {
            expected,
            actual: labels.len(),
        }),
        _ => Ok(()),
    }
}

fn build_camera(
    config: &Config,
    logger: &Arc<dyn Logger + Send + Sync>,
) -> Arc<dyn DeviceCamera + Send + Sync> {
    match &config.camera {
        CameraChoice::Fake {
            width,
            height,
            warm_up,
        } => Arc::new(DeviceCameraFake::new(
            logger.clone(),
            *width,
            *height,
            *warm_up,
        )),
        #[cfg(feature = "camera-v4l")]
        CameraChoice::V4l {
            device_path,
            width,
            height,
        } => Arc::new(DeviceCameraV4l::new(
            logger.clone(),
            device_path,
            *width,
            *height,
        )),
    }
}

fn build_display(config: &Config) -> Arc<Mutex<dyn DeviceDisplay + Send + Sync>> {
    match config.display {
        DisplayChoice::Gui => Arc::new(Mutex::new(DeviceDisplayGui::new())),
        DisplayChoice::Console => Arc::new(Mutex::new(DeviceDisplayConsole::new())),
    }
}
