/// Media type of every raster this crate serializes.
pub const PNG_MEDIA_TYPE: &str = "image/png";

/// Prefix of the canonical signature representation.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Marker any decodable signature must start with.
pub const IMAGE_DATA_URI_MARKER: &str = "data:image/";

/// Extension given to signature attachments on submission.
pub const ATTACHMENT_EXTENSION: &str = "png";

/// Segments shorter than this are treated as a single point.
pub const MIN_SEGMENT_LENGTH: f32 = 1e-3;
