//! JavaScript bridge for pad -> form messages
//!
//! Emissions are queued while a pad is borrowed and dispatched afterwards as
//! CustomEvents on the window object, so page listeners can safely call back
//! into the widget.

use inspecta_ipc::PadToForm;
use std::cell::RefCell;
use std::collections::VecDeque;
use wasm_bindgen::prelude::*;

/// Event name the owning form listens for
pub const SIGNATURE_EVENT: &str = "inspecta:signature";

thread_local! {
    /// Messages waiting to be dispatched to the page
    static OUTBOX: RefCell<VecDeque<PadToForm>> = RefCell::new(VecDeque::new());
}

/// Queue a message for the next flush
pub fn queue(msg: PadToForm) {
    OUTBOX.with(|queue| queue.borrow_mut().push_back(msg));
}

/// Dispatch every queued message to the page
pub fn flush() {
    while let Some(msg) = OUTBOX.with(|queue| queue.borrow_mut().pop_front()) {
        send_to_form(&msg);
    }
}

fn send_to_form(msg: &PadToForm) {
    let Some(window) = web_sys::window() else {
        web_sys::console::error_1(&"Inspecta: no global window".into());
        return;
    };

    let json = match msg.to_json() {
        Ok(json) => json,
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to serialize pad message: {}", e).into());
            return;
        }
    };

    let init = web_sys::CustomEventInit::new();
    init.set_detail(&JsValue::from_str(&json));

    let dispatched = web_sys::CustomEvent::new_with_event_init_dict(SIGNATURE_EVENT, &init)
        .and_then(|event| window.dispatch_event(&event));
    if let Err(e) = dispatched {
        web_sys::console::error_2(&"Failed to dispatch signature event".into(), &e);
    }
}
