use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Element, Event, KeyboardEvent};

use crate::config;
use crate::dom::js_err;
use crate::transport::LiveTransport;
use tilebridge_core::{DomKey, KeyStroke, PrintEvent, TerminalBridge, TerminalSink};

#[wasm_bindgen]
extern "C" {
    /// xterm.js widget, loaded by the page as the `Terminal` global.
    #[derive(Clone)]
    pub type Terminal;

    #[wasm_bindgen(constructor, catch)]
    fn new() -> Result<Terminal, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn open(this: &Terminal, parent: &Element) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn write(this: &Terminal, data: &str);

    #[wasm_bindgen(method, js_name = onKey)]
    fn on_key(this: &Terminal, listener: &Closure<dyn FnMut(JsValue)>) -> JsValue;

    #[wasm_bindgen(method)]
    fn dispose(this: &Terminal);
}

impl TerminalSink for Terminal {
    fn write(&self, data: &str) {
        Terminal::write(self, data);
    }
}

/// A mounted terminal. Dropping it detaches the print listener and the key
/// callback; `dispose` also tears the widget down.
pub(crate) struct MountedTerminal {
    bridge: Rc<TerminalBridge<Terminal, LiveTransport>>,
    _on_key: Closure<dyn FnMut(JsValue)>,
    key_subscription: JsValue,
    _print_listener: EventListener,
}

impl MountedTerminal {
    pub(crate) fn dispose(self) {
        dispose_subscription(&self.key_subscription);
        self.bridge.sink().dispose();
    }
}

pub(crate) fn mount(anchor: &Element, transport: LiveTransport) -> Result<MountedTerminal, String> {
    let window = web_sys::window().ok_or_else(|| "missing window".to_string())?;
    let global = Reflect::get(&window, &JsValue::from_str("Terminal")).map_err(js_err)?;
    if global.is_undefined() {
        return Err("Terminal global not loaded".to_string());
    }
    let terminal = Terminal::new().map_err(js_err)?;
    terminal.open(anchor).map_err(js_err)?;
    let bridge = Rc::new(TerminalBridge::new(terminal.clone(), transport));

    let key_bridge = bridge.clone();
    let on_key = Closure::wrap(Box::new(move |value: JsValue| {
        let Some(key) = read_keystroke(&value) else {
            gloo::console::warn!("tilebridge: key event without key data");
            return;
        };
        if let Err(err) = key_bridge.on_key(key) {
            gloo::console::warn!("tilebridge: key push failed", err);
        }
    }) as Box<dyn FnMut(JsValue)>);
    let key_subscription = terminal.on_key(&on_key);

    let print_bridge = bridge.clone();
    let print_event = config::hook_config().print_event.clone();
    let print_listener = EventListener::new(&window, print_event, move |event: &Event| {
        match read_print(event) {
            Ok(print) => print_bridge.on_print(&print),
            Err(err) => gloo::console::warn!("tilebridge: print ignored", err),
        }
    });

    if config::debug_enabled() {
        gloo::console::log!("tilebridge: terminal mounted");
    }
    Ok(MountedTerminal {
        bridge,
        _on_key: on_key,
        key_subscription,
        _print_listener: print_listener,
    })
}

fn read_keystroke(value: &JsValue) -> Option<KeyStroke> {
    let key = Reflect::get(value, &JsValue::from_str("key"))
        .ok()?
        .as_string()?;
    let dom_event = Reflect::get(value, &JsValue::from_str("domEvent"))
        .ok()
        .and_then(|event| event.dyn_into::<KeyboardEvent>().ok())
        .map(|event| DomKey {
            key: event.key(),
            code: event.code(),
            alt_key: event.alt_key(),
            ctrl_key: event.ctrl_key(),
            meta_key: event.meta_key(),
            shift_key: event.shift_key(),
        });
    Some(KeyStroke { key, dom_event })
}

fn read_print(event: &Event) -> Result<PrintEvent, String> {
    let event = event
        .dyn_ref::<CustomEvent>()
        .ok_or_else(|| "not a CustomEvent".to_string())?;
    let json = js_sys::JSON::stringify(&event.detail())
        .map_err(js_err)?
        .as_string()
        .ok_or_else(|| "print detail is not serializable".to_string())?;
    PrintEvent::from_detail_json(&json)
}

fn dispose_subscription(subscription: &JsValue) {
    let Ok(dispose) = Reflect::get(subscription, &JsValue::from_str("dispose")) else {
        return;
    };
    if let Ok(dispose) = dispose.dyn_into::<js_sys::Function>() {
        if let Err(err) = dispose.call0(subscription) {
            gloo::console::warn!("tilebridge: key subscription dispose failed", js_err(err));
        }
    }
}
