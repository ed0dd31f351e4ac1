//! Image encoding: `DynamicImage` → base64 JPEG wrapped in an [`ImagePart`].
//!
//! The model API takes images inline as base64 inside the JSON request body.
//! A resume page is mostly text on white, and at the render size used here a
//! fixed-quality JPEG keeps it legible while staying far below the request
//! size limit. Quality is not configurable.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Media type of every encoded page.
pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// Fixed JPEG quality (1–100).
pub const JPEG_QUALITY: u8 = 75;

/// One inline image: media type plus base64 data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: String,
}

/// The image payload handed to the completion requester.
///
/// Kept as a sequence so the request shape does not change if more pages
/// are ever sent, but it always holds exactly one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncodedImagePayload {
    parts: Vec<ImagePart>,
}

impl EncodedImagePayload {
    /// Wrap a single encoded page.
    pub fn single(part: ImagePart) -> Self {
        Self { parts: vec![part] }
    }

    /// The encoded page. Always present.
    pub fn first(&self) -> &ImagePart {
        &self.parts[0]
    }

    pub fn parts(&self) -> &[ImagePart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Encode a rasterised page as a base64 JPEG.
///
/// JPEG has no alpha channel, so the page is flattened to RGB first; pdfium
/// renders onto an opaque white background so nothing is lost.
pub fn encode_page(img: &DynamicImage) -> Result<ImagePart, image::ImageError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buf = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY))?;

    let b64 = STANDARD.encode(&buf);
    debug!(
        "Encoded {}x{} page → {} bytes JPEG, {} bytes base64",
        rgb.width(),
        rgb.height(),
        buf.len(),
        b64.len()
    );

    Ok(ImagePart {
        mime_type: JPEG_MIME_TYPE.to_string(),
        data: b64,
    })
}
