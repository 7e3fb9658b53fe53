use crate::device_camera::interface::Frame;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::interface::Classification;
use crate::library::logger::interface::Logger;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// What one render call saw. Kept by the fake so tests can assert on
/// the sequence of states the pipeline pushed at the display.
#[derive(Debug, Clone)]
pub struct RenderRecord {
    pub had_frame: bool,
    pub classification: Option<Classification>,
}

pub struct DeviceDisplayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    pub renders: Arc<Mutex<Vec<RenderRecord>>>,
    render_failure: Option<String>,
}

impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("display").with_namespace("fake"),
            renders: Arc::new(Mutex::new(Vec::new())),
            render_failure: None,
        }
    }

    /// Makes every render call fail with `message`. The call is still
    /// recorded first, so tests can count how far the pipeline got.
    pub fn with_render_failure(mut self, message: &str) -> Self {
        self.render_failure = Some(message.to_string());
        self
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("DeviceDisplayFake::init()")?;
        Ok(())
    }

    fn render(
        &mut self,
        frame: Option<&Frame>,
        classification: Option<&Classification>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let record = RenderRecord {
            had_frame: frame.is_some(),
            classification: classification.cloned(),
        };
        self.logger.info(&format!(
            "DeviceDisplayFake::render(frame: {}, classification: {:?})",
            record.had_frame, record.classification
        ))?;
        self.renders.lock().unwrap().push(record);
        match &self.render_failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}
