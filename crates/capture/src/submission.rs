//! Collecting signature attachments for a form submission
//!
//! A signature that cannot be decoded is equivalent to "not provided": it is
//! omitted from the submission with a diagnostic and never blocks the rest.

use tracing::{debug, warn};

use crate::codec::SignatureImage;
use crate::constants::ATTACHMENT_EXTENSION;
use crate::decoder::{BinaryPayload, DecodeError, decode};

/// A signature field left out of the submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Omission {
    pub field: String,
    pub error: DecodeError,
}

/// Attachments ready for a multi-part request, plus what was left out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub attachments: Vec<BinaryPayload>,
    pub omitted: Vec<Omission>,
}

impl Submission {
    /// Look up the attachment for a field by its filename
    pub fn attachment(&self, field: &str) -> Option<&BinaryPayload> {
        let filename = attachment_filename(field);
        self.attachments.iter().find(|a| a.filename == filename)
    }
}

/// Filename a field's signature is attached under
pub fn attachment_filename(field: &str) -> String {
    format!("{field}.{ATTACHMENT_EXTENSION}")
}

/// Decode every `(field, signature)` pair the form collected.
pub fn collect_attachments<'a, I>(fields: I) -> Submission
where
    I: IntoIterator<Item = (&'a str, &'a SignatureImage)>,
{
    let mut submission = Submission::default();
    for (field, image) in fields {
        match decode(image.as_str(), &attachment_filename(field)) {
            Ok(payload) => {
                debug!("collect_attachments: {} -> {} bytes", field, payload.len());
                submission.attachments.push(payload);
            }
            Err(error) => {
                if image.is_empty() {
                    debug!("collect_attachments: {} not signed", field);
                } else {
                    warn!("collect_attachments: omitting {}: {}", field, error);
                }
                submission.omitted.push(Omission {
                    field: field.to_string(),
                    error,
                });
            }
        }
    }
    submission
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::serialize;
    use crate::surface::CpuSurface;

    #[test]
    fn test_valid_and_invalid_fields() {
        let mut surface = CpuSurface::new(10, 10);
        surface.mark_drawn();
        let signed = serialize(&surface).unwrap();
        let unsigned = SignatureImage::empty();
        let broken = SignatureImage::from("data:image/png;base64,%%%");

        let submission = collect_attachments([
            ("inspector", &signed),
            ("owner", &unsigned),
            ("witness", &broken),
        ]);

        assert_eq!(submission.attachments.len(), 1);
        let attachment = submission.attachment("inspector").unwrap();
        assert_eq!(attachment.filename, "inspector.png");
        assert_eq!(attachment.media_type, "image/png");

        assert_eq!(submission.omitted.len(), 2);
        assert_eq!(submission.omitted[0].field, "owner");
        assert_eq!(submission.omitted[0].error, DecodeError::InvalidInput);
        assert!(matches!(
            submission.omitted[1].error,
            DecodeError::InvalidEncoding(_)
        ));
        assert!(submission.attachment("witness").is_none());
    }

    #[test]
    fn test_no_fields() {
        let submission = collect_attachments(std::iter::empty::<(&str, &SignatureImage)>());
        assert_eq!(submission, Submission::default());
    }
}
