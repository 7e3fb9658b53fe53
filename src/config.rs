use crate::image_classifier::models::model_config::ModelConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum CameraChoice {
    /// Synthetic pattern generator, runs anywhere.
    Fake {
        width: u32,
        height: u32,
        warm_up: Duration,
    },
    #[cfg(feature = "camera-v4l")]
    V4l {
        device_path: String,
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Clone)]
pub enum ClassifierChoice {
    /// Deterministic stand-in. `class_count` of `None` sizes it to the
    /// label table; `top_class` of `None` picks the middle class.
    Fake {
        class_count: Option<usize>,
        top_class: Option<usize>,
        simulated_latency: Duration,
    },
    Onnx(ModelConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayChoice {
    Gui,
    Console,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub labels_path: String,
    pub camera: CameraChoice,
    pub classifier: ClassifierChoice,
    pub display: DisplayChoice,
    /// How long the inference loop waits before asking for a frame
    /// again when none was ready.
    pub frame_poll_interval: Duration,
    /// Cadence of display refreshes on the main thread.
    pub render_tick_rate: Duration,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels_path: "./src/image_classifier/models/demo_labels.txt".to_string(),
            camera: CameraChoice::Fake {
                width: 640,
                height: 480,
                warm_up: Duration::from_secs(1),
            },
            classifier: ClassifierChoice::Fake {
                class_count: None,
                top_class: None,
                simulated_latency: Duration::from_millis(25),
            },
            display: DisplayChoice::Gui,
            frame_poll_interval: Duration::from_millis(5),
            render_tick_rate: Duration::from_millis(33),
            logger_timezone: utc(),
        }
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::FixedOffset::east_opt(0).unwrap()
}
