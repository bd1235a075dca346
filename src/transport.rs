use js_sys::Function;
use wasm_bindgen::JsValue;

use crate::config;
use crate::dom::js_err;
use tilebridge_core::{OutboundEvent, Transport};

/// Pushes events through the host hook's `pushEvent`, handed over as a
/// `(event, payload) => void` callback.
#[derive(Clone)]
pub(crate) struct LiveTransport {
    push: Function,
}

impl LiveTransport {
    pub(crate) fn new(push: Function) -> Self {
        Self { push }
    }
}

impl Transport for LiveTransport {
    fn push(&self, event: OutboundEvent) -> Result<(), String> {
        let json = event.payload_json()?;
        let payload = js_sys::JSON::parse(&json).map_err(js_err)?;
        if config::debug_enabled() {
            gloo::console::log!("tilebridge: push", event.name(), json);
        }
        self.push
            .call2(&JsValue::NULL, &JsValue::from_str(event.name()), &payload)
            .map_err(js_err)?;
        Ok(())
    }
}

pub(crate) fn push_or_warn(transport: &dyn Transport, event: OutboundEvent) {
    let name = event.name();
    if let Err(err) = transport.push(event) {
        gloo::console::warn!("tilebridge: push failed", name, err);
    }
}
