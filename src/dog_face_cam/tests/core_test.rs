#[cfg(test)]
mod core_test {
    use crate::dog_face_cam::core::{argmax, classification_from, PipelineError};
    use crate::image_classifier::labels::LabelTable;
    use std::time::{Duration, Instant};

    #[test]
    fn test_argmax_picks_the_peak() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[0.9]), Some(0));
    }

    #[test]
    fn test_argmax_of_empty_is_none() {
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_equal_peaks_resolve_to_first_index() {
        assert_eq!(argmax(&[0.4, 0.4, 0.1]), Some(0));
        assert_eq!(argmax(&[0.1, 0.3, 0.3, 0.3]), Some(1));
    }

    #[test]
    fn test_winner_gets_name_and_probability() {
        let labels = LabelTable::parse("0 cat\n1 dog\n2 fox");

        let result = classification_from(&[0.1, 0.7, 0.2], &labels, Instant::now()).unwrap();

        assert_eq!(result.label, "dog");
        assert_eq!(result.probability, 0.7);
    }

    #[test]
    fn test_latency_counts_everything_since_the_clock_started() {
        let labels = LabelTable::parse("0 cat\n1 dog\n2 fox");
        // The clock starts before the classifier runs; whatever has
        // elapsed by the time the winner is picked must be included.
        let started = Instant::now() - Duration::from_millis(17);

        let result = classification_from(&[0.1, 0.7, 0.2], &labels, started).unwrap();

        assert!(result.latency >= Duration::from_millis(17));
        assert!(result.latency < Duration::from_secs(1));
    }

    #[test]
    fn test_empty_probabilities_are_fatal() {
        let labels = LabelTable::parse("0 cat");
        let err = classification_from(&[], &labels, Instant::now())
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::EmptyProbabilities));
    }

    #[test]
    fn test_winner_without_a_name_is_fatal() {
        // 1000-way model against a 999-line label file: the last class
        // can win but cannot be named.
        let text = (0..999)
            .map(|i| format!("{} class {}", i, i))
            .collect::<Vec<_>>()
            .join("\n");
        let labels = LabelTable::parse(&text);
        assert_eq!(labels.len(), 999);

        let mut probabilities = vec![0.0005; 1000];
        probabilities[999] = 0.5;

        let err = classification_from(&probabilities, &labels, Instant::now())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            PipelineError::LabelIndexOutOfRange {
                index: 999,
                len: 999
            }
        ));
    }

    #[test]
    fn test_names_with_spaces_survive_lookup() {
        let labels = LabelTable::parse("281 tabby, tabby cat\n282 tiger cat");
        let result = classification_from(&[0.2, 0.8], &labels, Instant::now()).unwrap();
        assert_eq!(result.label, "tiger cat");
    }
}
