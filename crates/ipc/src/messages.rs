//! Messages exchanged between a signature pad and its owning form.

use serde::{Deserialize, Serialize};

use crate::error::IpcError;

/// Messages from the owning form to a signature pad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FormToPad {
    /// Replace the pad's inbound value (canonical data URI, or "" for none)
    SetValue { image: String },

    /// Wipe the pad and emit the empty signature
    Clear,

    /// Emit the pad's current raster
    Save,

    /// Reconfigure the logical resolution
    Resize { width: u32, height: u32 },
}

impl FormToPad {
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        let msg: Self = serde_json::from_str(json)?;
        if let Self::Resize { width, height } = msg {
            if width == 0 || height == 0 {
                return Err(IpcError::InvalidFormat(format!(
                    "resize to {width}x{height}"
                )));
            }
        }
        Ok(msg)
    }
}

/// Messages from a signature pad to the owning form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PadToForm {
    /// The pad produced a new value for the field `id`
    SignatureChanged { id: String, image: String },

    /// Something went wrong that the form should surface
    Error { id: String, message: String },
}

impl PadToForm {
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}
