use config::Config;
use dog_face_cam::main::DogFaceCam;
use library::logger::impl_console::LoggerConsole;
use std::sync::Arc;

mod config;
mod device_camera;
mod device_display;
mod dog_face_cam;
mod image_classifier;
mod library;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger = Arc::new(LoggerConsole::new(config.logger_timezone));

    let app = DogFaceCam::bootstrap(config, logger)?;

    app.run()?;

    Ok(())
}
