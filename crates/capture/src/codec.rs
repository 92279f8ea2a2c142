//! Raster codec: surface <-> canonical PNG data URI
//!
//! The canonical representation of a signature is
//! `data:image/png;base64,<payload>`; the empty string means "no signature".

use std::fmt;
use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::constants::PNG_DATA_URI_PREFIX;
use crate::decoder::{self, DecodeError};
use crate::surface::CpuSurface;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Surface {width}x{height} does not match its pixel buffer")]
    InvalidRaster { width: u32, height: u32 },
    #[error("Signature value is not decodable: {0}")]
    Decode(#[from] DecodeError),
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
}

/// Canonical serialized signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureImage(String);

impl SignatureImage {
    /// The canonical "no signature" value
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Wrap encoded PNG bytes as a data URI
    pub fn from_png_bytes(png: &[u8]) -> Self {
        Self(format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(png)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SignatureImage {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SignatureImage {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for SignatureImage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignatureImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode the current raster as a PNG data URI.
pub fn serialize(surface: &CpuSurface) -> Result<SignatureImage, CodecError> {
    let raster = RgbaImage::from_raw(surface.width, surface.height, surface.to_rgba8()).ok_or(
        CodecError::InvalidRaster {
            width: surface.width,
            height: surface.height,
        },
    )?;

    let mut png = Vec::new();
    raster.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    debug!(
        "serialize: {}x{} raster -> {} PNG bytes",
        surface.width,
        surface.height,
        png.len()
    );
    Ok(SignatureImage::from_png_bytes(&png))
}

/// Replace the surface content with `image`.
///
/// The surface is always cleared to the background first. An empty image
/// leaves it blank; otherwise the decoded image is scaled to exactly fill
/// the logical resolution and composited on top. On error the surface stays
/// cleared and blank.
pub fn restore(surface: &mut CpuSurface, image: &SignatureImage) -> Result<(), CodecError> {
    surface.clear();
    if image.is_empty() {
        return Ok(());
    }

    let payload = decoder::decode(image.as_str(), "restore")?;
    let mut decoded = image::load_from_memory(&payload.bytes)?.to_rgba8();

    if decoded.dimensions() != (surface.width, surface.height) {
        debug!(
            "restore: scaling {}x{} -> {}x{}",
            decoded.width(),
            decoded.height(),
            surface.width,
            surface.height
        );
        decoded = imageops::resize(&decoded, surface.width, surface.height, FilterType::Triangle);
    }

    surface.composite_rgba8(&decoded);
    surface.mark_drawn();
    Ok(())
}
