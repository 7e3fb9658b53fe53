use crate::device_camera::interface::DeviceCamera;
use crate::dog_face_cam::core::{classification_from, PipelineError};
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_classifier::labels::LabelTable;
use crate::library::latest_slot::LatestSlot;
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

const HEARTBEAT_EVERY: u64 = 30;

/// Owns the background inference thread. The loop polls the camera,
/// classifies whatever frame is current and publishes the labeled
/// result for the render side to pick up.
pub struct InferenceWorker {
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<Result<(), PipelineError>>>,
}

impl InferenceWorker {
    pub fn spawn(
        camera: Arc<dyn DeviceCamera + Send + Sync>,
        classifier: Arc<dyn ImageClassifier + Send + Sync>,
        labels: Arc<LabelTable>,
        results: Arc<LatestSlot<Classification>>,
        frame_poll_interval: Duration,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> std::io::Result<Self> {
        let cancel = Arc::new(AtomicBool::new(false));
        let loop_cancel = cancel.clone();
        let logger = logger.with_namespace("worker");

        let handle = std::thread::Builder::new()
            .name("inference-worker".to_string())
            .spawn(move || {
                let outcome = run_loop(
                    camera,
                    classifier,
                    labels,
                    results,
                    frame_poll_interval,
                    &logger,
                    &loop_cancel,
                );
                if let Err(e) = &outcome {
                    let _ = logger.error(&format!("stopping: {}", e));
                }
                outcome
            })?;

        Ok(Self {
            cancel,
            handle: Some(handle),
        })
    }

    /// True while the loop thread is alive. The loop only exits on
    /// cancellation or a fatal pipeline error.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Signals the loop to stop and waits for it. Returns the loop's
    /// verdict: `Ok` after plain cancellation, or the fatal error if
    /// the loop already died on its own.
    pub fn shutdown(mut self) -> Result<(), PipelineError> {
        self.cancel.store(true, Ordering::SeqCst);
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or(Err(PipelineError::WorkerPanicked)),
            None => Ok(()),
        }
    }
}

fn run_loop(
    camera: Arc<dyn DeviceCamera + Send + Sync>,
    classifier: Arc<dyn ImageClassifier + Send + Sync>,
    labels: Arc<LabelTable>,
    results: Arc<LatestSlot<Classification>>,
    frame_poll_interval: Duration,
    logger: &Arc<dyn Logger + Send + Sync>,
    cancel: &AtomicBool,
) -> Result<(), PipelineError> {
    let _ = logger.info("inference loop running");
    let mut published: u64 = 0;

    while !cancel.load(Ordering::SeqCst) {
        let Some(frame) = camera.current_frame() else {
            // Nothing captured yet. Back off instead of spinning.
            std::thread::sleep(frame_poll_interval);
            continue;
        };

        let started = Instant::now();
        let probabilities = classifier
            .classify(&frame)
            .map_err(PipelineError::Classify)?;
        let result = classification_from(&probabilities, &labels, started)?;

        published += 1;
        if published % HEARTBEAT_EVERY == 1 {
            let _ = logger.info(&format!(
                "#{} {} ({:.1}%) in {:.1} ms",
                published,
                result.label,
                result.probability * 100.0,
                result.latency.as_secs_f64() * 1000.0
            ));
        }

        results.publish(result);
    }

    let _ = logger.info("inference loop stopped");
    Ok(())
}
