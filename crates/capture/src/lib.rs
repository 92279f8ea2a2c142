//! Inspecta signature capture pipeline
//!
//! This crate provides the engine behind every signature widget:
//! - [`mapper`] - viewport to logical surface coordinates
//! - [`recorder`] - the idle/drawing stroke state machine
//! - [`surface`] / [`raster`] - the CPU raster and segment rasterizer
//! - [`codec`] - surface <-> canonical PNG data URI
//! - [`decoder`] - data URI -> bytes + media type for multi-part submission
//! - [`pad`] - a complete capture widget composing the above
//! - [`submission`] - decoding every collected signature for a form

pub mod codec;
pub mod constants;
pub mod decoder;
pub mod mapper;
pub mod pad;
pub mod raster;
pub mod recorder;
pub mod submission;
pub mod surface;
pub mod types;

pub use codec::*;
pub use constants::*;
pub use decoder::*;
pub use mapper::*;
pub use pad::*;
pub use recorder::*;
pub use submission::*;
pub use surface::*;
pub use types::*;
