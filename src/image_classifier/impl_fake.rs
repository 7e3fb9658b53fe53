use crate::device_camera::interface::Frame;
use crate::image_classifier::interface::ImageClassifier;
use rand::distr::{Distribution, Uniform};
use std::time::Duration;

/// Model stand-in that always votes for one configured class. The
/// winning probability gets a little random jitter so the overlay
/// visibly updates, but the argmax never moves, which keeps tests
/// deterministic.
pub struct ImageClassifierFake {
    class_count: usize,
    top_class: usize,
    simulated_latency: Duration,
}

impl ImageClassifierFake {
    pub fn new(class_count: usize) -> Self {
        Self {
            class_count,
            top_class: class_count / 2,
            simulated_latency: Duration::from_millis(15),
        }
    }

    pub fn with_top_class(mut self, top_class: usize) -> Self {
        self.top_class = top_class;
        self
    }

    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        _frame: &Frame,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        std::thread::sleep(self.simulated_latency);

        if self.class_count == 0 {
            return Ok(Vec::new());
        }

        let mut rng = rand::rng();
        let jitter = Uniform::new(0.0f32, 0.05)?;

        let spread = if self.class_count > 1 {
            0.3 / (self.class_count - 1) as f32
        } else {
            0.0
        };

        let mut probabilities = vec![spread; self.class_count];
        let winner = self.top_class.min(self.class_count - 1);
        probabilities[winner] = 0.65 + jitter.sample(&mut rng);

        Ok(probabilities)
    }

    fn num_classes(&self) -> Option<usize> {
        Some(self.class_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn blank_frame() -> Frame {
        Frame::new(4, 4, vec![0; 4 * 4 * 3])
    }

    #[test]
    fn test_configured_class_always_wins() {
        let classifier = ImageClassifierFake::new(10)
            .with_top_class(7)
            .with_simulated_latency(Duration::ZERO);
        for _ in 0..20 {
            let probabilities = classifier.classify(&blank_frame()).unwrap();
            assert_eq!(probabilities.len(), 10);
            let top = probabilities
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i);
            assert_eq!(top, Some(7));
        }
    }

    #[test]
    fn test_zero_classes_yields_empty_vector() {
        let classifier = ImageClassifierFake::new(0).with_simulated_latency(Duration::ZERO);
        assert!(classifier.classify(&blank_frame()).unwrap().is_empty());
    }

    #[test]
    fn test_reports_its_output_width() {
        let classifier = ImageClassifierFake::new(1000);
        assert_eq!(classifier.num_classes(), Some(1000));
        let _: Arc<dyn ImageClassifier + Send + Sync> = Arc::new(classifier);
    }
}
