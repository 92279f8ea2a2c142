//! Binary decoding of signature data URIs for multi-part submission

use std::borrow::Cow;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

use crate::constants::IMAGE_DATA_URI_MARKER;

/// Standard alphabet, padding optional, trailing bits tolerated.
/// Matches what browsers accept for `data:` payloads.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("not an image data URI")]
    InvalidInput,
    #[error("data URI header carries no media type")]
    MissingMediaType,
    #[error("invalid data URI payload: {0}")]
    InvalidEncoding(String),
}

/// Raw bytes of a signature, ready to attach to a multi-part request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPayload {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub filename: String,
}

impl BinaryPayload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decode a `data:image/...;base64,...` string into bytes plus media type.
///
/// Pure; a failure means the signature should be treated as absent.
pub fn decode(image: &str, filename: &str) -> Result<BinaryPayload, DecodeError> {
    if image.is_empty() || !image.starts_with(IMAGE_DATA_URI_MARKER) {
        return Err(DecodeError::InvalidInput);
    }

    let parts: Vec<&str> = image.split(',').collect();
    let [header, payload] = parts.as_slice() else {
        return Err(DecodeError::InvalidEncoding(format!(
            "expected 2 comma-separated parts, found {}",
            parts.len()
        )));
    };

    let media_type = media_type(header).ok_or(DecodeError::MissingMediaType)?;

    let payload: Cow<str> = if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(payload.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    } else {
        Cow::Borrowed(*payload)
    };
    let bytes = FORGIVING
        .decode(payload.as_bytes())
        .map_err(|e| DecodeError::InvalidEncoding(e.to_string()))?;

    Ok(BinaryPayload {
        bytes,
        media_type: media_type.to_string(),
        filename: filename.to_string(),
    })
}

/// The token between `:` and the first following `;`
fn media_type(header: &str) -> Option<&str> {
    let start = header.find(':')? + 1;
    let len = header[start..].find(';')?;
    let token = header[start..start + len].trim();
    (!token.is_empty()).then_some(token)
}
