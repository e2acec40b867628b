//! Capture hand-off: the payload the capture side leaves for the editor.
//!
//! The capture side stores a JSON [`Handoff`] holding the screenshot as a data
//! URL, the capture mode and, for region captures, the selected rectangle in
//! CSS pixels. The host decodes the image; the engine then resolves the crop
//! against the decoded pixel size with [`resolve_crop`].

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("malformed capture hand-off: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("capture hand-off has no image data")]
    MissingImage,
    #[error("capture image data is not an image data URL")]
    NotImageData,
    #[error("captured image is unavailable ({width}x{height})")]
    ImageUnavailable { width: u32, height: u32 },
}

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum CropError {
    #[error("crop rectangle has non-finite coordinates")]
    NonFinite,
    #[error("crop rectangle lies outside the {image_width}x{image_height} image")]
    OutsideImage { image_width: u32, image_height: u32 },
    #[error("crop rectangle is empty after clamping")]
    Empty,
}

/// How the screenshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// Visible part of the page.
    #[default]
    Visible,
    /// Full scrollable page, stitched.
    Full,
    /// User-drawn rectangle on top of a visible capture.
    Region,
}

/// Region selection in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Crop in image pixels, clamped to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

fn default_dpr() -> f64 {
    1.0
}

/// Payload handed from the capture side to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handoff {
    /// `data:image/...` URL of the captured image.
    pub image_data: String,
    #[serde(default)]
    pub mode: CaptureMode,
    #[serde(default)]
    pub crop: Option<CropRect>,
    /// Ratio between image pixels and the CSS pixels of `crop`.
    #[serde(default = "default_dpr")]
    pub device_pixel_ratio: f64,
}

impl Handoff {
    /// Parse and validate the stored payload.
    ///
    /// A missing, zero or non-finite device pixel ratio is treated as 1.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on malformed JSON or missing image data.
    pub fn from_json(raw: &str) -> Result<Self, SourceError> {
        let mut handoff: Self = serde_json::from_str(raw)?;
        let data = handoff.image_data.trim();
        if data.is_empty() {
            return Err(SourceError::MissingImage);
        }
        if !data.starts_with("data:image/") {
            return Err(SourceError::NotImageData);
        }
        if !handoff.device_pixel_ratio.is_finite() || handoff.device_pixel_ratio <= 0.0 {
            log::warn!("ignoring device pixel ratio {}", handoff.device_pixel_ratio);
            handoff.device_pixel_ratio = 1.0;
        }
        Ok(handoff)
    }
}

/// Reject a decoded image with no pixels.
///
/// # Errors
///
/// Returns [`SourceError::ImageUnavailable`] if either dimension is zero.
pub fn check_image_size(width: u32, height: u32) -> Result<(), SourceError> {
    if width == 0 || height == 0 {
        return Err(SourceError::ImageUnavailable { width, height });
    }
    Ok(())
}

/// Convert a CSS-pixel crop into image pixels clamped to the image bounds.
///
/// Corners are scaled by `dpr` and rounded; a crop with negative extent is
/// normalized first.
///
/// # Errors
///
/// Returns [`CropError`] if the crop is non-finite, lies entirely outside the
/// image, or is empty once clamped.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn resolve_crop(crop: CropRect, dpr: f64, image_width: u32, image_height: u32) -> Result<PixelRect, CropError> {
    let values = [crop.x, crop.y, crop.width, crop.height, dpr];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(CropError::NonFinite);
    }

    let (w, h) = (f64::from(image_width), f64::from(image_height));
    let ax = (crop.x * dpr).round();
    let ay = (crop.y * dpr).round();
    let bx = ((crop.x + crop.width) * dpr).round();
    let by = ((crop.y + crop.height) * dpr).round();
    let (left, right) = (ax.min(bx), ax.max(bx));
    let (top, bottom) = (ay.min(by), ay.max(by));

    if left >= w || top >= h || right <= 0.0 || bottom <= 0.0 {
        return Err(CropError::OutsideImage { image_width, image_height });
    }

    let left = left.clamp(0.0, w);
    let top = top.clamp(0.0, h);
    let right = right.clamp(0.0, w);
    let bottom = bottom.clamp(0.0, h);
    if right - left < 1.0 || bottom - top < 1.0 {
        return Err(CropError::Empty);
    }

    Ok(PixelRect { x: left as u32, y: top as u32, width: (right - left) as u32, height: (bottom - top) as u32 })
}
