use crate::device_camera::interface::{DeviceCamera, Frame};
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Camera stand-in that renders a scrolling synthetic pattern, so the
/// rest of the pipeline can run on machines without a capture device.
/// It produces nothing until `warm_up` has elapsed after `start`,
/// mimicking the first-frames gap of real hardware.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    width: u32,
    height: u32,
    warm_up: Duration,
    started_at: Mutex<Option<Instant>>,
    tick: AtomicU64,
}

impl DeviceCameraFake {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        width: u32,
        height: u32,
        warm_up: Duration,
    ) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            width,
            height,
            warm_up,
            started_at: Mutex::new(None),
            tick: AtomicU64::new(0),
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        *self.started_at.lock().unwrap() = Some(Instant::now());
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        *self.started_at.lock().unwrap() = None;
        self.logger.info("Camera stopped")?;
        Ok(())
    }

    fn current_frame(&self) -> Option<Frame> {
        let started_at = (*self.started_at.lock().unwrap())?;
        if started_at.elapsed() < self.warm_up {
            return None;
        }
        let tick = self.tick.fetch_add(1, Ordering::Relaxed);
        Some(synthetic_frame(self.width, self.height, tick))
    }
}

fn synthetic_frame(width: u32, height: u32, tick: u64) -> Frame {
    let phase = (tick * 3 % 256) as u32;
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(((x + phase) % 256) as u8);
            data.push(((y + phase) % 256) as u8);
            data.push(((x + y) % 256) as u8);
        }
    }
    Frame::new(width, height, data)
}
