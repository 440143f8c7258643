//! Photo intake (upload → data URI) and photo preparation for the PDF
//! (data URI → centre-cropped square JPEG).

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use thiserror::Error;

/// Quality used when re-encoding the photo for the PDF.
pub const JPEG_QUALITY: u8 = 95;

/// Embedded photos are rendered at twice their slot size for print sharpness.
const OVERSAMPLE: f32 = 2.0;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("the uploaded file is empty")]
    Empty,

    #[error("the uploaded file is not an image")]
    NotAnImage,

    #[error("not a base64 data URI")]
    MalformedDataUrl,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image could not be decoded: {0}")]
    Image(#[from] image::ImageError),
}

/// JPEG bytes ready to embed with DCTDecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Intake
// ────────────────────────────────────────────────────────────────────────────

/// Builds `data:<mime>;base64,<payload>` for an uploaded file.
///
/// The declared content type is used when it is an `image/*` type; otherwise
/// the format is sniffed from the bytes. Nothing else about the file is
/// checked.
pub fn to_data_url(bytes: &[u8], declared_mime: Option<&str>) -> Result<String, PhotoError> {
    if bytes.is_empty() {
        return Err(PhotoError::Empty);
    }

    let mime = match declared_mime.map(str::trim) {
        Some(m) if m.starts_with("image/") => m.to_string(),
        _ => image::guess_format(bytes)
            .map_err(|_| PhotoError::NotAnImage)?
            .to_mime_type()
            .to_string(),
    };

    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

// ────────────────────────────────────────────────────────────────────────────
// Preparation
// ────────────────────────────────────────────────────────────────────────────

/// Raw bytes of a `data:...;base64,...` URI.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, PhotoError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or(PhotoError::MalformedDataUrl)?;
    let (meta, payload) = rest.split_once(',').ok_or(PhotoError::MalformedDataUrl)?;
    if !meta.ends_with(";base64") {
        return Err(PhotoError::MalformedDataUrl);
    }
    Ok(STANDARD.decode(payload.trim())?)
}

fn centre_square(img: &DynamicImage) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    let side = w.min(h);
    img.crop_imm((w - side) / 2, (h - side) / 2, side, side)
}

/// Decodes the photo, centre-crops it to a square, scales it for a slot of
/// `slot_size` page units and re-encodes it as JPEG.
pub fn prepare_photo(data_url: &str, slot_size: f32) -> Result<JpegImage, PhotoError> {
    let bytes = decode_data_url(data_url)?;
    let img = image::load_from_memory(&bytes)?;

    let square = centre_square(&img);
    let target = ((slot_size * OVERSAMPLE).round() as u32).max(1);
    let square = if square.width() > target {
        square.resize_exact(target, target, FilterType::Lanczos3)
    } else {
        square
    };

    // JPEG has no alpha; flatten to RGB.
    let rgb = DynamicImage::ImageRgb8(square.to_rgb8());
    let mut data = Cursor::new(Vec::new());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut data, JPEG_QUALITY))?;

    Ok(JpegImage {
        data: data.into_inner(),
        width: rgb.width(),
        height: rgb.height(),
    })
}
