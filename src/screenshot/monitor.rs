//! Full-screen capture of the primary monitor via `xcap`.

use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use tracing::debug;
use xcap::Monitor;

use super::encode::to_data_uri;
use super::ScreenshotCapture;
use crate::error::ScreenshotError;

#[derive(Clone, Copy, Debug, Default)]
pub struct MonitorCapture;

fn capture_error(e: impl std::fmt::Display) -> ScreenshotError {
    ScreenshotError::Tool {
        tool: "xcap".to_string(),
        message: e.to_string(),
    }
}

impl ScreenshotCapture for MonitorCapture {
    fn capture(&self) -> Result<String, ScreenshotError> {
        let monitors = Monitor::all().map_err(capture_error)?;
        let monitor = monitors
            .iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .or_else(|| monitors.first())
            .ok_or_else(|| capture_error("no monitors found"))?;

        let image = monitor.capture_image().map_err(capture_error)?;
        let (width, height) = (image.width(), image.height());

        let mut png_data = Vec::new();
        PngEncoder::new(&mut png_data)
            .write_image(&image, width, height, image::ExtendedColorType::Rgba8)
            .map_err(|e| ScreenshotError::Encode(e.to_string()))?;

        debug!(width, height, bytes = png_data.len(), "Monitor captured with xcap");
        to_data_uri(&png_data)
    }
}
