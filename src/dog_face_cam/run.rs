use crate::dog_face_cam::main::{DogFaceCam, StartupError};
use crate::dog_face_cam::worker::InferenceWorker;
use std::sync::atomic::Ordering;

impl DogFaceCam {
    /// Brings up the devices, starts the inference thread and then
    /// drives the display from this thread until the window is closed,
    /// ctrl-c arrives, the display fails or the inference loop dies.
    /// Every exit path joins the worker and stops the camera before
    /// returning whichever error ended the run.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.device_display
            .lock()
            .unwrap()
            .init()
            .map_err(StartupError::Display)?;
        self.device_camera.start().map_err(StartupError::Camera)?;

        let worker = InferenceWorker::spawn(
            self.device_camera.clone(),
            self.image_classifier.clone(),
            self.labels.clone(),
            self.results.clone(),
            self.config.frame_poll_interval,
            self.logger.clone(),
        )
        .map_err(StartupError::Worker)?;

        let shutdown = self.shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst)) {
            let _ = self
                .logger
                .error(&format!("ctrl-c handler not installed: {}", e));
        }

        let _ = self.logger.info(&format!(
            "pipeline running ({} labels)",
            self.labels.len()
        ));

        let mut render_failure = None;
        while !self.shutdown.load(Ordering::SeqCst)
            && worker.is_running()
            && self.device_display.lock().unwrap().is_open()
        {
            if let Err(e) = self.render_tick() {
                // Fall through to the join below instead of returning here.
                render_failure = Some(e);
                break;
            }
            std::thread::sleep(self.config.render_tick_rate);
        }

        let _ = self.logger.info("shutting down");
        let worker_outcome = worker.shutdown();

        if let Err(e) = self.device_camera.stop() {
            let _ = self.logger.error(&format!("camera stop: {}", e));
        }

        if let Some(e) = render_failure {
            return Err(e);
        }
        worker_outcome?;
        let _ = self.logger.info("goodbye");
        Ok(())
    }

    /// One display refresh: latest frame, latest classification,
    /// whatever they currently are.
    pub fn render_tick(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let frame = self.device_camera.current_frame();
        let latest = self.results.latest();
        self.device_display
            .lock()
            .unwrap()
            .render(frame.as_ref(), latest.as_ref())
    }
}
