/// Where to find the network and what geometry it expects. An ONNX
/// file carries topology and weights together, so one path covers both.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: String,
    /// (width, height) of the model input plane.
    pub input_shape: (u32, u32),
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: "./src/image_classifier/models/mobilenetv2-7.onnx".to_string(),
            input_shape: (224, 224),
        }
    }
}
