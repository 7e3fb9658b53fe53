use crate::device_camera::interface::Frame;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::interface::Classification;
use std::error::Error;

const TICKS_BETWEEN_REPEATS: u32 = 30;

/// Headless rendition of the live view: one status line per
/// classification. A line is printed whenever the winning label moves,
/// plus a periodic repeat so the output shows the pipeline is alive.
pub struct DeviceDisplayConsole {
    last_label: Option<String>,
    ticks_since_print: u32,
    announced_wait: bool,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            last_label: None,
            ticks_since_print: 0,
            announced_wait: false,
        }
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn render(
        &mut self,
        frame: Option<&Frame>,
        classification: Option<&Classification>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        match classification {
            Some(result) => {
                let label_moved = self.last_label.as_deref() != Some(result.label.as_str());
                self.ticks_since_print += 1;

                if label_moved || self.ticks_since_print >= TICKS_BETWEEN_REPEATS {
                    let size = match frame {
                        Some(frame) => format!("{}x{}", frame.width, frame.height),
                        None => "no frame".to_string(),
                    };
                    println!(
                        "{:>5.1}%  {:<28} {:>6.1} ms  [{}]",
                        result.probability * 100.0,
                        result.label,
                        result.latency.as_secs_f64() * 1000.0,
                        size
                    );
                    self.last_label = Some(result.label.clone());
                    self.ticks_since_print = 0;
                }
            }
            None => {
                if !self.announced_wait {
                    println!("waiting for first classification...");
                    self.announced_wait = true;
                }
            }
        }
        Ok(())
    }
}
