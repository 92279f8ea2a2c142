//! Raw interaction events delivered to a signature pad.

use serde::{Deserialize, Serialize};

/// Viewport-space position of a pointer or touch event.
///
/// Mouse and touch events are resolved into this union once, at the
/// platform boundary, so nothing downstream branches on event shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InputPosition {
    Pointer { x: f32, y: f32 },
    Touch { x: f32, y: f32 },
}

impl InputPosition {
    /// Resolve an event's position.
    ///
    /// When the event carries a touch list, its first entry wins; otherwise
    /// the event's own client coordinates are used. A present but empty touch
    /// list (e.g. `touchend`) has no position.
    pub fn resolve(client: Option<(f32, f32)>, touches: Option<&[(f32, f32)]>) -> Option<Self> {
        match touches {
            Some(list) => list.first().map(|&(x, y)| Self::Touch { x, y }),
            None => client.map(|(x, y)| Self::Pointer { x, y }),
        }
    }

    /// Client coordinates regardless of the originating device
    pub fn client(&self) -> (f32, f32) {
        match *self {
            Self::Pointer { x, y } | Self::Touch { x, y } => (x, y),
        }
    }
}

/// Interaction events, one per platform callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CaptureEvent {
    /// Pointer pressed or touch started
    Down(InputPosition),
    /// Pointer or touch moved
    Move(InputPosition),
    /// Pointer released or touch ended
    Up,
    /// Pointer left the surface
    Leave,
}
