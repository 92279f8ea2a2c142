//! IPC message protocol for Inspecta signature capture
//!
//! Defines the raw interaction events fed into a signature pad and the
//! messages exchanged between a pad and the form that owns it.

mod error;
mod input;
mod messages;

pub use error::IpcError;
pub use input::{CaptureEvent, InputPosition};
pub use messages::{FormToPad, PadToForm};
