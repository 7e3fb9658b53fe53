use crate::device_camera::interface::Frame;
use crate::image_classifier::interface::Classification;
use std::error::Error;

/// Output surface for the live view: the current frame plus the label
/// overlay.
pub trait DeviceDisplay: Send + Sync {
    /// Bring the surface up. Windowed backends open their window here.
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Show what the pipeline knows right now. Either side may be
    /// absent: no frame while the camera warms up, no classification
    /// before the first inference lands.
    fn render(
        &mut self,
        frame: Option<&Frame>,
        classification: Option<&Classification>,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// False once the user has dismissed the surface. Backends without
    /// a close affordance stay open forever.
    fn is_open(&self) -> bool {
        true
    }
}
