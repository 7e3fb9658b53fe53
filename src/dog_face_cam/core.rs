use crate::image_classifier::interface::Classification;
use crate::image_classifier::labels::LabelTable;
use std::time::Instant;

/// Errors that end the inference loop. Everything here means the
/// pipeline is misassembled or the model is lying about itself;
/// nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("classifier failed: {0}")]
    Classify(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("classifier returned an empty probability vector")]
    EmptyProbabilities,
    #[error("winning class {index} has no label (table holds {len})")]
    LabelIndexOutOfRange { index: usize, len: usize },
    #[error("inference thread panicked")]
    WorkerPanicked,
}

/// Index of the largest probability. Equal peaks resolve to the
/// earliest index, the same order the label file assigns names in.
pub fn argmax(probabilities: &[f32]) -> Option<usize> {
    let mut best_index = 0;
    let mut best_value = *probabilities.first()?;
    for (index, &value) in probabilities.iter().enumerate().skip(1) {
        if value > best_value {
            best_index = index;
            best_value = value;
        }
    }
    Some(best_index)
}

/// Turns one raw probability vector into the displayable result: pick
/// the winner, stop the latency clock, look up the name. The clock the
/// caller started before classifying stops as soon as the winner is
/// known; the label lookup is not part of the measured time.
pub fn classification_from(
    probabilities: &[f32],
    labels: &LabelTable,
    started: Instant,
) -> Result<Classification, PipelineError> {
    let index = argmax(probabilities).ok_or(PipelineError::EmptyProbabilities)?;
    let latency = started.elapsed();
    let label = labels
        .get(index)
        .ok_or(PipelineError::LabelIndexOutOfRange {
            index,
            len: labels.len(),
        })?;
    Ok(Classification {
        label: label.to_string(),
        probability: probabilities[index],
        latency,
    })
}
