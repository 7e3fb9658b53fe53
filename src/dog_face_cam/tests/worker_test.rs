#[cfg(test)]
mod worker_test {
    use crate::device_camera::impl_fake::DeviceCameraFake;
    use crate::device_camera::interface::DeviceCamera;
    use crate::dog_face_cam::core::PipelineError;
    use crate::dog_face_cam::worker::InferenceWorker;
    use crate::image_classifier::impl_fake::ImageClassifierFake;
    use crate::image_classifier::interface::{Classification, ImageClassifier};
    use crate::image_classifier::labels::LabelTable;
    use crate::library::latest_slot::LatestSlot;
    use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()))
    }

    fn spawn_pipeline(
        camera: Arc<dyn DeviceCamera + Send + Sync>,
        classifier: Arc<dyn ImageClassifier + Send + Sync>,
        labels_text: &str,
    ) -> (InferenceWorker, Arc<LatestSlot<Classification>>) {
        let labels = Arc::new(LabelTable::parse(labels_text));
        let results = Arc::new(LatestSlot::new());
        let worker = InferenceWorker::spawn(
            camera,
            classifier,
            labels,
            results.clone(),
            Duration::from_millis(5),
            logger(),
        )
        .unwrap();
        (worker, results)
    }

    fn wait_until(deadline: Duration, mut check: impl FnMut() -> bool) -> bool {
        let started = Instant::now();
        while started.elapsed() < deadline {
            if check() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        check()
    }

    #[test]
    fn test_publishes_the_winning_label() {
        let camera = Arc::new(DeviceCameraFake::new(logger(), 32, 24, Duration::ZERO));
        camera.start().unwrap();
        let classifier = Arc::new(
            ImageClassifierFake::new(3)
                .with_top_class(1)
                .with_simulated_latency(Duration::from_millis(5)),
        );

        let (worker, results) = spawn_pipeline(camera, classifier, "0 cat\n1 dog\n2 fox");

        assert!(wait_until(Duration::from_secs(2), || results
            .latest()
            .is_some()));

        let result = results.latest().unwrap();
        assert_eq!(result.label, "dog");
        assert!(result.probability >= 0.65);
        // Latency covers the whole classify call, so it can never be
        // shorter than the classifier's own work.
        assert!(result.latency >= Duration::from_millis(5));

        worker.shutdown().unwrap();
    }

    #[test]
    fn test_idles_quietly_until_a_frame_arrives() {
        let camera = Arc::new(DeviceCameraFake::new(
            logger(),
            32,
            24,
            Duration::from_secs(3600),
        ));
        camera.start().unwrap();
        let classifier =
            Arc::new(ImageClassifierFake::new(3).with_simulated_latency(Duration::ZERO));

        let (worker, results) = spawn_pipeline(camera, classifier, "0 cat\n1 dog\n2 fox");

        // Twenty-odd poll intervals with nothing to classify.
        std::thread::sleep(Duration::from_millis(100));

        assert!(results.latest().is_none());
        assert!(worker.is_running());
        worker.shutdown().unwrap();
    }

    #[test]
    fn test_winner_outside_label_table_stops_the_loop() {
        let camera = Arc::new(DeviceCameraFake::new(logger(), 32, 24, Duration::ZERO));
        camera.start().unwrap();
        let classifier = Arc::new(
            ImageClassifierFake::new(1000)
                .with_top_class(999)
                .with_simulated_latency(Duration::ZERO),
        );
        let labels_text = (0..999)
            .map(|i| format!("{} class {}", i, i))
            .collect::<Vec<_>>()
            .join("\n");

        let (worker, results) = spawn_pipeline(camera, classifier, &labels_text);

        assert!(wait_until(Duration::from_secs(2), || !worker.is_running()));
        assert!(results.latest().is_none());
        assert!(matches!(
            worker.shutdown(),
            Err(PipelineError::LabelIndexOutOfRange {
                index: 999,
                len: 999
            })
        ));
    }

    #[test]
    fn test_empty_model_output_stops_the_loop() {
        let camera = Arc::new(DeviceCameraFake::new(logger(), 32, 24, Duration::ZERO));
        camera.start().unwrap();
        let classifier =
            Arc::new(ImageClassifierFake::new(0).with_simulated_latency(Duration::ZERO));

        let (worker, _results) = spawn_pipeline(camera, classifier, "0 cat");

        assert!(wait_until(Duration::from_secs(2), || !worker.is_running()));
        assert!(matches!(
            worker.shutdown(),
            Err(PipelineError::EmptyProbabilities)
        ));
    }

    #[test]
    fn test_shutdown_while_idle_joins_cleanly() {
        // Camera never started: the loop spends its life in the
        // backoff branch and must still notice cancellation promptly.
        let camera = Arc::new(DeviceCameraFake::new(logger(), 32, 24, Duration::ZERO));
        let classifier =
            Arc::new(ImageClassifierFake::new(3).with_simulated_latency(Duration::ZERO));

        let (worker, results) = spawn_pipeline(camera, classifier, "0 cat\n1 dog\n2 fox");

        worker.shutdown().unwrap();
        assert!(results.latest().is_none());
    }
}
