//! QR Image Generator
//!
//! Renders table URLs into PNG data URLs. Error correction is level H so
//! codes stay scannable on worn or laminated table stickers.

use base64::Engine;
use qrcode::{EcLevel, QrCode};
use shared::error::{AppError, ErrorCode};
use std::io::Cursor;

/// Minimum rendered edge in pixels, sized for print
const MIN_EDGE: u32 = 300;

/// Public URL a code resolves to when scanned.
pub fn target_url(base_url: &str, table_id: i64) -> String {
    format!("{}/table/{}", base_url.trim_end_matches('/'), table_id)
}

/// Render `contents` as a QR PNG wrapped in a base64 data URL.
pub fn render_data_url(contents: &str) -> Result<String, AppError> {
    let code = QrCode::with_error_correction_level(contents.as_bytes(), EcLevel::H).map_err(
        |e| AppError::with_message(ErrorCode::QrEncodingFailed, format!("QR encoding failed: {e}")),
    )?;
    let pixels = code
        .render::<image::Luma<u8>>()
        .quiet_zone(true)
        .min_dimensions(MIN_EDGE, MIN_EDGE)
        .build();

    let mut png = Cursor::new(Vec::new());
    image::DynamicImage::ImageLuma8(pixels)
        .write_to(&mut png, image::ImageFormat::Png)
        .map_err(|e| {
            AppError::with_message(ErrorCode::QrEncodingFailed, format!("PNG encoding failed: {e}"))
        })?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(png.into_inner());
    Ok(format!("data:image/png;base64,{encoded}"))
}
