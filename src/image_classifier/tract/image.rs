use crate::device_camera::interface::Frame;
use image::imageops::{self, FilterType};
use image::RgbImage;
use tract_onnx::prelude::*;

pub fn frame_to_image(frame: &Frame) -> Result<RgbImage, Box<dyn std::error::Error + Send + Sync>> {
    RgbImage::from_raw(frame.width, frame.height, frame.data.to_vec())
        .ok_or_else(|| "frame buffer shorter than width*height*3".into())
}

/// Scales a captured frame to the model's input plane and lays it out
/// as an NCHW float tensor with [0,1] per-channel values.
pub fn frame_to_tensor(
    frame: &Frame,
    width: u32,
    height: u32,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let rgb = frame_to_image(frame)?;
    let resized = imageops::resize(&rgb, width, height, FilterType::Triangle);

    let tensor = tract_ndarray::Array4::from_shape_fn(
        (1, 3, height as usize, width as usize),
        |(_, c, y, x)| resized.get_pixel(x as u32, y as u32)[c] as f32 / 255.0,
    );

    Ok(tensor.into_tensor())
}
