//! Signature pad: one capture widget instance
//!
//! The pad owns its drawing surface and stroke recorder for its whole
//! lifetime, and hands every new [`SignatureImage`] to the owning form by
//! value through the emission callback, keyed by the pad's identifier.

use inspecta_config::{CaptureConfig, StrokeStyle};
use inspecta_ipc::{CaptureEvent, FormToPad};
use tracing::{debug, info, warn};

use crate::codec::{self, CodecError, SignatureImage};
use crate::mapper::{BoundingBox, CoordinateMapper};
use crate::recorder::{RecorderState, StrokeRecorder};
use crate::surface::CpuSurface;
use crate::types::{Point, Stroke};

/// Receives `(identifier, image)` on every emission
pub type EmitCallback = Box<dyn FnMut(&str, SignatureImage)>;

/// Receives `(identifier, message)` when the pad cannot honour a request
pub type ErrorCallback = Box<dyn FnMut(&str, String)>;

/// What the platform binding should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Suppress the platform's default gesture handling (scroll, selection)
    pub prevent_default: bool,
    /// The surface changed and should be presented again
    pub repaint: bool,
}

pub struct SignaturePad {
    id: String,
    style: StrokeStyle,
    mapper: CoordinateMapper,
    surface: CpuSurface,
    recorder: StrokeRecorder,
    /// Latest value supplied by the form or emitted to it
    value: SignatureImage,
    on_emit: Option<EmitCallback>,
    on_error: Option<ErrorCallback>,
}

impl SignaturePad {
    /// Create a blank pad
    pub fn new(id: impl Into<String>, config: CaptureConfig) -> Self {
        let CaptureConfig { surface, style } = config;
        Self {
            id: id.into(),
            style,
            mapper: CoordinateMapper::new(surface.width, surface.height),
            surface: CpuSurface::new(surface.width, surface.height),
            recorder: StrokeRecorder::new(),
            value: SignatureImage::empty(),
            on_emit: None,
            on_error: None,
        }
    }

    /// Pre-populate from a previously saved signature
    pub fn with_value(mut self, value: SignatureImage) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_emit_callback(mut self, callback: impl FnMut(&str, SignatureImage) + 'static) -> Self {
        self.set_emit_callback(callback);
        self
    }

    pub fn set_emit_callback(&mut self, callback: impl FnMut(&str, SignatureImage) + 'static) {
        self.on_emit = Some(Box::new(callback));
    }

    pub fn with_error_callback(mut self, callback: impl FnMut(&str, String) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn surface(&self) -> &CpuSurface {
        &self.surface
    }

    pub fn state(&self) -> RecorderState {
        self.recorder.state()
    }

    /// Strokes completed since the surface was last restored
    pub fn strokes(&self) -> &[Stroke] {
        self.recorder.strokes()
    }

    pub fn value(&self) -> &SignatureImage {
        &self.value
    }

    pub fn is_blank(&self) -> bool {
        self.surface.is_blank()
    }

    /// Replace the inbound value and redraw the surface from it
    pub fn set_value(&mut self, value: SignatureImage) {
        info!("SignaturePad[{}]: set_value (empty={})", self.id, value.is_empty());
        self.value = value;
        self.restore();
    }

    /// Reconfigure the logical resolution, then redraw from the current value.
    /// A zero dimension is reported and leaves the pad unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            self.report(format!("invalid size {width}x{height}"));
            return;
        }
        if (width, height) == (self.surface.width, self.surface.height) {
            return;
        }
        info!("SignaturePad[{}]: resize to {}x{}", self.id, width, height);
        self.recorder.abandon();
        self.surface = CpuSurface::new(width, height);
        self.mapper = CoordinateMapper::new(width, height);
        self.restore();
    }

    /// Redraw from `value`, abandoning any in-progress stroke first.
    /// An undecodable value is dropped so the value matches the blank surface.
    fn restore(&mut self) {
        if self.recorder.abandon() {
            debug!("SignaturePad[{}]: restore abandoned an in-progress stroke", self.id);
        }
        self.recorder.reset();
        if let Err(e) = codec::restore(&mut self.surface, &self.value) {
            self.value = SignatureImage::empty();
            self.report(format!("could not restore value: {e}"));
        }
    }

    /// Route one platform event through the mapper and recorder
    pub fn handle(&mut self, event: CaptureEvent, bounds: Option<&BoundingBox>) -> EventResponse {
        match event {
            CaptureEvent::Down(position) => {
                match self.mapper.map(position, bounds) {
                    Some(point) => self.pointer_down(point),
                    None => debug!("SignaturePad[{}]: down without surface, skipped", self.id),
                }
                EventResponse {
                    prevent_default: true,
                    repaint: false,
                }
            }
            CaptureEvent::Move(position) => {
                if !self.recorder.is_drawing() {
                    return EventResponse::default();
                }
                let repaint = self
                    .mapper
                    .map(position, bounds)
                    .is_some_and(|point| self.pointer_move(point));
                EventResponse {
                    prevent_default: true,
                    repaint,
                }
            }
            CaptureEvent::Up | CaptureEvent::Leave => {
                self.pointer_up();
                EventResponse {
                    prevent_default: true,
                    repaint: false,
                }
            }
        }
    }

    /// Apply a message from the owning form
    pub fn apply(&mut self, message: FormToPad) {
        match message {
            FormToPad::SetValue { image } => self.set_value(image.into()),
            FormToPad::Clear => self.clear(),
            FormToPad::Save => {
                if let Err(e) = self.save() {
                    self.report(format!("save failed: {e}"));
                }
            }
            FormToPad::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Begin a stroke at an already-mapped point
    pub fn pointer_down(&mut self, point: Point) {
        if self.recorder.is_drawing() {
            // Missed the previous up; close that stroke properly
            self.pointer_up();
        }
        debug!("SignaturePad[{}]: down at ({:.1}, {:.1})", self.id, point.x, point.y);
        self.recorder.begin(point);
    }

    /// Extend the current stroke. Returns true if the surface changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        self.recorder.stroke_to(&mut self.surface, &self.style, point)
    }

    /// Close the current stroke and emit the result
    pub fn pointer_up(&mut self) {
        if !self.recorder.finish() {
            return;
        }
        match self.snapshot() {
            Ok(image) => self.emit(image),
            Err(e) => self.report(format!("could not encode stroke: {e}")),
        }
    }

    /// Wipe the surface and emit the empty signature
    pub fn clear(&mut self) {
        info!("SignaturePad[{}]: clear", self.id);
        self.value = SignatureImage::empty();
        self.restore();
        self.emit(SignatureImage::empty());
    }

    /// Emit the current raster.
    ///
    /// A blank surface emits the canonical empty signature rather than a
    /// PNG of the background.
    pub fn save(&mut self) -> Result<SignatureImage, CodecError> {
        let image = self.snapshot()?;
        info!("SignaturePad[{}]: save (empty={})", self.id, image.is_empty());
        self.emit(image.clone());
        Ok(image)
    }

    /// Serialize without emitting
    pub fn snapshot(&self) -> Result<SignatureImage, CodecError> {
        if self.surface.is_blank() {
            return Ok(SignatureImage::empty());
        }
        codec::serialize(&self.surface)
    }

    fn emit(&mut self, image: SignatureImage) {
        self.value = image.clone();
        if let Some(callback) = self.on_emit.as_mut() {
            callback(&self.id, image);
        }
    }

    fn report(&mut self, message: String) {
        warn!("SignaturePad[{}]: {}", self.id, message);
        if let Some(callback) = self.on_error.as_mut() {
            callback(&self.id, message);
        }
    }
}
