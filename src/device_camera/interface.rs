use std::sync::Arc;

/// One captured image, 8-bit RGB, row-major, tightly packed.
///
/// Frames are immutable once captured. Cloning is cheap; the pixel
/// buffer is shared, never copied.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 3) as usize);
        Self {
            width,
            height,
            data: data.into(),
        }
    }
}

pub trait DeviceCamera: Send + Sync {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    /// Most recent frame the device has produced, or `None` while the
    /// camera is stopped or still warming up. Never blocks.
    fn current_frame(&self) -> Option<Frame>;
}
