use crate::device_camera::interface::Frame;
use crate::image_classifier::interface::ImageClassifier;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::frame_to_tensor;
use std::path::Path;
use tract_onnx::prelude::*;

#[derive(Debug, thiserror::Error)]
#[error("failed to load onnx model {path}")]
pub struct ModelLoadError {
    pub path: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Real classifier running an ONNX network through tract. Loading,
/// optimizing and planning all happen in `new`, so a bad model path or
/// a malformed file surfaces before any frame is captured.
pub struct ImageClassifierTract {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    input_shape: (u32, u32),
    output_classes: Option<usize>,
}

impl ImageClassifierTract {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelLoadError> {
        if !Path::new(&config.onnx_model_path).is_file() {
            return Err(ModelLoadError {
                path: config.onnx_model_path.clone(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound).into(),
            });
        }

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| ModelLoadError {
                path: config.onnx_model_path.clone(),
                source: e.into(),
            })?;

        // A concrete [1, N] output fact tells us the class count before
        // the first run. Symbolic shapes leave it unknown.
        let output_classes = model
            .model()
            .output_fact(0)
            .ok()
            .and_then(|fact| fact.shape.as_concrete())
            .and_then(|shape| shape.last().copied());

        Ok(Self {
            model,
            input_shape: config.input_shape,
            output_classes,
        })
    }
}

impl ImageClassifier for ImageClassifierTract {
    fn classify(
        &self,
        frame: &Frame,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        let (width, height) = self.input_shape;
        let input = frame_to_tensor(frame, width, height)?;
        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs[0].to_array_view::<f32>()?;
        Ok(output.iter().copied().collect())
    }

    fn num_classes(&self) -> Option<usize> {
        self.output_classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file_names_the_path() {
        let config = ModelConfig {
            onnx_model_path: "/nonexistent/model.onnx".to_string(),
            input_shape: (224, 224),
        };
        let err = ImageClassifierTract::new(&config).err().unwrap();
        assert!(err.to_string().contains("/nonexistent/model.onnx"));
    }
}
