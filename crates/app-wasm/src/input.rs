//! DOM event translation for the capture pipeline

use inspecta_capture::BoundingBox;
use inspecta_ipc::{CaptureEvent, InputPosition};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent, TouchEvent};

/// DOM events a widget listens to on its canvas
pub const LISTENED_EVENTS: [&str; 8] = [
    "mousedown",
    "mousemove",
    "mouseup",
    "mouseleave",
    "touchstart",
    "touchmove",
    "touchend",
    "touchcancel",
];

/// Resolve a DOM event into a capture event.
/// Returns None for events without a usable position.
pub fn capture_event(event: &Event) -> Option<CaptureEvent> {
    let kind = event.type_();
    match kind.as_str() {
        "mousedown" | "touchstart" => position(event, &kind).map(CaptureEvent::Down),
        "mousemove" | "touchmove" => position(event, &kind).map(CaptureEvent::Move),
        "mouseup" | "touchend" | "touchcancel" => Some(CaptureEvent::Up),
        "mouseleave" => Some(CaptureEvent::Leave),
        _ => None,
    }
}

fn position(event: &Event, kind: &str) -> Option<InputPosition> {
    // Dispatch on the event name rather than instanceof: TouchEvent is not
    // defined in every desktop browser.
    if kind.starts_with("touch") {
        let list = event.unchecked_ref::<TouchEvent>().touches();
        let touches: Vec<(f32, f32)> = (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| (t.client_x() as f32, t.client_y() as f32))
            .collect();
        InputPosition::resolve(None, Some(&touches))
    } else {
        let mouse = event.unchecked_ref::<MouseEvent>();
        InputPosition::resolve(Some((mouse.client_x() as f32, mouse.client_y() as f32)), None)
    }
}

/// Current on-screen bounding box of an element
pub fn bounding_box(element: &Element) -> BoundingBox {
    let rect = element.get_bounding_client_rect();
    BoundingBox::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}
