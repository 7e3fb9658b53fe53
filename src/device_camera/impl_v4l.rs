use crate::device_camera::interface::{DeviceCamera, Frame};
use crate::library::latest_slot::LatestSlot;
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, FourCC};

/// Webcam backend over Video4Linux2. A capture thread owns the device
/// and the mmap stream, converts each YUYV buffer to RGB and publishes
/// it into a slot the pipeline polls. The device never crosses threads.
pub struct DeviceCameraV4l {
    logger: Arc<dyn Logger + Send + Sync>,
    device_path: String,
    width: u32,
    height: u32,
    latest: Arc<LatestSlot<Frame>>,
    running: Arc<AtomicBool>,
    capture_thread: Mutex<Option<JoinHandle<()>>>,
}

impl DeviceCameraV4l {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        device_path: &str,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("v4l"),
            device_path: device_path.to_string(),
            width,
            height,
            latest: Arc::new(LatestSlot::new()),
            running: Arc::new(AtomicBool::new(false)),
            capture_thread: Mutex::new(None),
        }
    }
}

impl DeviceCamera for DeviceCameraV4l {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.running.store(true, Ordering::SeqCst);

        let device_path = self.device_path.clone();
        let width = self.width;
        let height = self.height;
        let latest = self.latest.clone();
        let running = self.running.clone();
        let logger = self.logger.clone();

        let handle = std::thread::Builder::new()
            .name("camera-capture".to_string())
            .spawn(move || {
                if let Err(e) = capture_loop(&device_path, width, height, &latest, &running, &logger)
                {
                    let _ = logger.error(&format!("capture stopped: {}", e));
                }
                running.store(false, Ordering::SeqCst);
            })?;

        *self.capture_thread.lock().unwrap() = Some(handle);
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.capture_thread.lock().unwrap().take() {
            let _ = handle.join();
        }
        self.latest.clear();
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn current_frame(&self) -> Option<Frame> {
        if !self.running.load(Ordering::SeqCst) {
            return None;
        }
        self.latest.latest()
    }
}

fn capture_loop(
    device_path: &str,
    width: u32,
    height: u32,
    latest: &LatestSlot<Frame>,
    running: &AtomicBool,
    logger: &Arc<dyn Logger + Send + Sync>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let device = Device::with_path(device_path)?;

    let mut format = device.format()?;
    format.width = width;
    format.height = height;
    format.fourcc = FourCC::new(b"YUYV");
    // The driver may answer with a different geometry than requested.
    let format = device.set_format(&format)?;
    if format.fourcc != FourCC::new(b"YUYV") {
        return Err(format!("device only offers {:?}, wanted YUYV", format.fourcc).into());
    }

    logger.info(&format!(
        "capturing {}x{} from {}",
        format.width, format.height, device_path
    ))?;

    let mut stream = Stream::with_buffers(&device, Type::VideoCapture, 4)?;

    while running.load(Ordering::SeqCst) {
        let (buffer, _meta) = stream.next()?;
        let rgb = yuyv_to_rgb(buffer, format.width, format.height);
        latest.publish(Frame::new(format.width, format.height, rgb));
    }

    Ok(())
}

fn yuyv_to_rgb(yuyv: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);

    for chunk in yuyv.chunks(4) {
        if chunk.len() < 4 {
            break;
        }

        let y0 = chunk[0] as f32;
        let u = chunk[1] as f32 - 128.0;
        let y1 = chunk[2] as f32;
        let v = chunk[3] as f32 - 128.0;

        for y in [y0, y1] {
            let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
            let g = (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8;
            let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;
            rgb.extend_from_slice(&[r, g, b]);
        }
    }

    rgb
}
