use crate::device_camera::interface::Frame;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::interface::Classification;
use eframe::egui;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone, Default)]
struct GuiState {
    frame: Option<Frame>,
    classification: Option<Classification>,
    window_closed: bool,
}

struct DisplayWindow {
    state: Arc<Mutex<GuiState>>,
    smoothed_rate: Option<f32>,
    last_seen: Option<Classification>,
}

impl DisplayWindow {
    fn track_inference_rate(&mut self, state: &GuiState) {
        let Some(result) = &state.classification else {
            return;
        };
        if self.last_seen.as_ref() == Some(result) {
            return;
        }
        let secs = result.latency.as_secs_f32();
        if secs > 0.0 {
            let instant_rate = 1.0 / secs;
            self.smoothed_rate = Some(match self.smoothed_rate {
                Some(rate) => rate * 0.9 + instant_rate * 0.1,
                None => instant_rate,
            });
        }
        self.last_seen = Some(result.clone());
    }
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = self.state.lock().unwrap().clone();
        self.track_inference_rate(&state);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                match &state.frame {
                    Some(frame) => {
                        let image = egui::ColorImage::from_rgb(
                            [frame.width as usize, frame.height as usize],
                            &frame.data,
                        );
                        let texture =
                            ctx.load_texture("camera-frame", image, egui::TextureOptions::LINEAR);
                        ui.add(egui::Image::new(&texture).shrink_to_fit());
                    }
                    None => {
                        ui.add_space(40.0);
                        ui.label("waiting for camera...");
                    }
                }

                let overlay = match &state.classification {
                    Some(result) => format!(
                        "{}  {:.1}%  {:.0} ms",
                        result.label,
                        result.probability * 100.0,
                        result.latency.as_secs_f64() * 1000.0
                    ),
                    None => "warming up...".to_string(),
                };
                ui.label(
                    egui::RichText::new(overlay)
                        .monospace()
                        .size(20.0)
                        .color(egui::Color32::from_rgb(120, 255, 120)),
                );

                if let Some(rate) = self.smoothed_rate {
                    ui.label(
                        egui::RichText::new(format!("{:.1} inferences/s", rate))
                            .monospace()
                            .size(12.0)
                            .color(egui::Color32::GRAY),
                    );
                }
            });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(33));
    }
}

pub struct DeviceDisplayGui {
    state: Arc<Mutex<GuiState>>,
    window_thread: Option<thread::JoinHandle<()>>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(GuiState::default())),
            window_thread: None,
        }
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let state = self.state.clone();

        // Spawn the window in a separate thread
        let handle = thread::Builder::new()
            .name("gui-window".to_string())
            .spawn(move || {
                let options = eframe::NativeOptions {
                    viewport: egui::ViewportBuilder::default().with_inner_size([680.0, 560.0]),
                    // The event loop runs off the main thread; winit only
                    // permits that with the per-platform any-thread switch.
                    event_loop_builder: Some(Box::new(|builder| {
                        #[cfg(target_os = "linux")]
                        {
                            use winit::platform::wayland::EventLoopBuilderExtWayland;
                            use winit::platform::x11::EventLoopBuilderExtX11;
                            EventLoopBuilderExtWayland::with_any_thread(builder, true);
                            EventLoopBuilderExtX11::with_any_thread(builder, true);
                        }
                        #[cfg(target_os = "windows")]
                        {
                            use winit::platform::windows::EventLoopBuilderExtWindows;
                            builder.with_any_thread(true);
                        }
                        #[cfg(not(any(target_os = "linux", target_os = "windows")))]
                        let _ = builder;
                    })),
                    ..Default::default()
                };

                let window = DisplayWindow {
                    state: state.clone(),
                    smoothed_rate: None,
                    last_seen: None,
                };

                // This will block in the new thread until the window is closed
                let _ =
                    eframe::run_native("Dog Face Cam", options, Box::new(|_cc| Box::new(window)));

                state.lock().unwrap().window_closed = true;
            })?;
        self.window_thread = Some(handle);

        Ok(())
    }

    fn render(
        &mut self,
        frame: Option<&Frame>,
        classification: Option<&Classification>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut state = self.state.lock().unwrap();
        state.frame = frame.cloned();
        state.classification = classification.cloned();
        Ok(())
    }

    fn is_open(&self) -> bool {
        if self.state.lock().unwrap().window_closed {
            return false;
        }
        // A window thread that died without reporting back (event loop
        // refused, no display server) counts as closed as well.
        match &self.window_thread {
            Some(handle) => !handle.is_finished(),
            None => true,
        }
    }
}
