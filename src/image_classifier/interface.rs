use crate::device_camera::interface::Frame;
use std::time::Duration;

/// One labeled prediction, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub probability: f32,
    pub latency: Duration,
}

pub trait ImageClassifier: Send + Sync {
    /// Per-class probabilities for one frame, in model output order.
    /// Implementations own their preprocessing; callers hand over the
    /// raw RGB frame exactly as captured.
    fn classify(&self, frame: &Frame)
        -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>>;

    /// Width of the output vector, when the model declares it up front.
    fn num_classes(&self) -> Option<usize>;
}
