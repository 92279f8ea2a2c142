//! Inspecta signature widget for the browser
//!
//! Attaches a [`SignaturePad`] to an HTML `<canvas>`: DOM pointer and touch
//! events drive the pad, the raster is presented with `putImageData`, and
//! every emission reaches the page as an `inspecta:signature` CustomEvent.

use std::cell::RefCell;
use std::rc::Rc;

use inspecta_capture::{DecodeError, SignatureImage, SignaturePad, decode};
use inspecta_config::CaptureConfig;
use inspecta_ipc::{FormToPad, PadToForm};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Event, File, FilePropertyBag,
    HtmlCanvasElement, ImageData,
};

mod bridge;
mod input;
mod logging;

pub use bridge::SIGNATURE_EVENT;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    logging::init();
}

/// State shared between the widget handle and its DOM listeners
struct Attached {
    pad: RefCell<SignaturePad>,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Attached {
    /// Match the canvas backing store to the logical resolution and repaint
    fn present(&self) {
        let pad = self.pad.borrow();
        let surface = pad.surface();
        if self.canvas.width() != surface.width || self.canvas.height() != surface.height {
            self.canvas.set_width(surface.width);
            self.canvas.set_height(surface.height);
        }

        let rgba = surface.to_rgba8();
        let result = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(rgba.as_slice()),
            surface.width,
            surface.height,
        )
        .and_then(|image| self.ctx.put_image_data(&image, 0.0, 0.0));
        if let Err(e) = result {
            web_sys::console::error_2(&"Failed to present signature surface".into(), &e);
        }
    }

    fn on_event(&self, event: &Event) {
        let Some(capture) = input::capture_event(event) else {
            return;
        };
        let bounds = input::bounding_box(&self.canvas);
        let response = self.pad.borrow_mut().handle(capture, Some(&bounds));
        if response.prevent_default {
            event.prevent_default();
        }
        if response.repaint {
            self.present();
        }
        bridge::flush();
    }

    /// Run an operation on the pad, then repaint and deliver emissions
    fn with_pad<R>(&self, f: impl FnOnce(&mut SignaturePad) -> R) -> R {
        let result = {
            let mut pad = self.pad.borrow_mut();
            f(&mut *pad)
        };
        self.present();
        bridge::flush();
        result
    }
}

type Listener = Closure<dyn FnMut(Event)>;

/// A signature pad bound to a canvas element
#[wasm_bindgen]
pub struct SignatureWidget {
    attached: Rc<Attached>,
    listeners: Vec<(&'static str, Listener)>,
}

#[wasm_bindgen]
impl SignatureWidget {
    /// Attach to the canvas with element id `canvas_id`.
    ///
    /// `config` is an optional JSON `CaptureConfig`; `value` an optional
    /// previously saved signature to pre-populate the pad with.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        identifier: &str,
        config: Option<String>,
        value: Option<String>,
    ) -> Result<SignatureWidget, JsValue> {
        let config = match config {
            Some(json) => CaptureConfig::from_json(&json).map_err(to_js)?,
            None => CaptureConfig::default(),
        };

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut pad = SignaturePad::new(identifier, config)
            .with_emit_callback(|id, image| {
                bridge::queue(PadToForm::SignatureChanged {
                    id: id.to_string(),
                    image: image.into_string(),
                })
            })
            .with_error_callback(|id, message| {
                bridge::queue(PadToForm::Error {
                    id: id.to_string(),
                    message,
                })
            });
        if let Some(value) = value {
            pad.set_value(SignatureImage::from(value));
        }

        let attached = Rc::new(Attached {
            pad: RefCell::new(pad),
            canvas,
            ctx,
        });
        attached.present();
        // Deliver a hydration error, if any
        bridge::flush();

        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        let mut listeners = Vec::with_capacity(input::LISTENED_EVENTS.len());
        for name in input::LISTENED_EVENTS {
            let target = attached.clone();
            let listener: Listener = Closure::new(move |event: Event| target.on_event(&event));
            attached
                .canvas
                .add_event_listener_with_callback_and_add_event_listener_options(
                    name,
                    listener.as_ref().unchecked_ref(),
                    &options,
                )?;
            listeners.push((name, listener));
        }

        Ok(SignatureWidget {
            attached,
            listeners,
        })
    }

    /// Wipe the pad and emit the empty signature
    pub fn clear(&self) {
        self.attached.with_pad(|pad| pad.clear());
    }

    /// Emit and return the current signature ("" when nothing is drawn)
    pub fn save(&self) -> Result<String, JsValue> {
        self.attached
            .with_pad(|pad| pad.save())
            .map(SignatureImage::into_string)
            .map_err(to_js)
    }

    /// Replace the pad's value, e.g. when loading a saved record
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&self, value: &str) {
        self.attached
            .with_pad(|pad| pad.set_value(SignatureImage::from(value)));
    }

    /// Reconfigure the logical resolution
    pub fn resize(&self, width: u32, height: u32) -> Result<(), JsValue> {
        if width == 0 || height == 0 {
            return Err(JsValue::from_str(&format!("invalid size {width}x{height}")));
        }
        self.attached.with_pad(|pad| pad.resize(width, height));
        Ok(())
    }

    /// Apply a JSON `FormToPad` message
    #[wasm_bindgen(js_name = applyMessage)]
    pub fn apply_message(&self, json: &str) -> Result<(), JsValue> {
        let message = FormToPad::from_json(json).map_err(to_js)?;
        self.attached.with_pad(|pad| pad.apply(message));
        Ok(())
    }

    /// The pad's current value
    pub fn value(&self) -> String {
        self.attached.pad.borrow().value().as_str().to_string()
    }

    #[wasm_bindgen(js_name = isBlank)]
    pub fn is_blank(&self) -> bool {
        self.attached.pad.borrow().is_blank()
    }
}

impl Drop for SignatureWidget {
    fn drop(&mut self) {
        for (name, listener) in self.listeners.drain(..) {
            let removed = self
                .attached
                .canvas
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
            if let Err(e) = removed {
                web_sys::console::error_2(&format!("Failed to remove {name} listener").into(), &e);
            }
        }
    }
}

/// Decode a signature into a `File` for `FormData`.
///
/// Throws the decode error message when the value is not a decodable
/// signature; callers should leave that attachment out of the submission.
#[wasm_bindgen(js_name = decodeSignature)]
pub fn decode_signature(value: &JsValue, filename: &str) -> Result<File, JsValue> {
    let image = value
        .as_string()
        .ok_or_else(|| to_js(DecodeError::InvalidInput))?;
    let payload = decode(&image, filename).map_err(to_js)?;

    let bytes = js_sys::Uint8Array::from(payload.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = FilePropertyBag::new();
    options.set_type(&payload.media_type);
    File::new_with_u8_array_sequence_and_options(&parts, &payload.filename, &options)
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
