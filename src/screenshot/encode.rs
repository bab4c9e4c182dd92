//! PNG encoding and data URI helpers.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Local};

use crate::error::ScreenshotError;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Wrap PNG bytes as a `data:image/png;base64,` URI.
///
/// An empty capture means the user dismissed the tool.
pub fn to_data_uri(png: &[u8]) -> Result<String, ScreenshotError> {
    if png.is_empty() {
        return Err(ScreenshotError::Cancelled);
    }
    Ok(format!("{}{}", PNG_DATA_URI_PREFIX, BASE64.encode(png)))
}

/// Encode raw RGBA pixels as PNG.
pub fn encode_rgba_png(width: u32, height: u32, rgba: Vec<u8>) -> Result<Vec<u8>, ScreenshotError> {
    let rgba_image = image::RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
        ScreenshotError::Encode(format!(
            "pixel buffer does not match {}x{} RGBA",
            width, height
        ))
    })?;

    let mut png_data = Vec::new();
    rgba_image
        .write_to(&mut Cursor::new(&mut png_data), image::ImageFormat::Png)
        .map_err(|e| ScreenshotError::Encode(e.to_string()))?;
    Ok(png_data)
}

/// `PopAsk_Screenshot_<yyyymmdd_HHMMSS>.png`
pub fn screenshot_filename(now: DateTime<Local>) -> String {
    format!("PopAsk_Screenshot_{}.png", now.format("%Y%m%d_%H%M%S"))
}
