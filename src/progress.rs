use std::cell::RefCell;

use gloo::events::EventListener;
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Event;

use crate::config;
use crate::dom::js_err;
use tilebridge_core::ProgressSettings;

pub(crate) const PAGE_LOADING_START: &str = "phx:page-loading-start";
pub(crate) const PAGE_LOADING_STOP: &str = "phx:page-loading-stop";

thread_local! {
    static PROGRESS_LISTENERS: RefCell<Vec<EventListener>> = RefCell::new(Vec::new());
}

fn with_indicator<F: FnOnce(&js_sys::Object)>(global: &str, action: F) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(value) = Reflect::get(&window, &JsValue::from_str(global)) else {
        return;
    };
    if value.is_null() || value.is_undefined() {
        return;
    }
    let Ok(obj) = value.dyn_into::<js_sys::Object>() else {
        return;
    };
    action(&obj);
}

fn call(global: &str, method: &str, args: &[JsValue]) {
    with_indicator(global, |indicator| {
        let Ok(value) = Reflect::get(indicator, &JsValue::from_str(method)) else {
            return;
        };
        let Ok(func) = value.dyn_into::<Function>() else {
            return;
        };
        let array = js_sys::Array::new();
        for arg in args {
            array.push(arg);
        }
        if let Err(err) = func.apply(indicator, &array) {
            gloo::console::warn!("tilebridge: progress indicator failed", method, js_err(err));
        }
    });
}

/// Shows the page's progress bar while the live connection navigates.
/// Does nothing when disabled in config or already installed.
pub(crate) fn install(settings: &ProgressSettings) {
    if !settings.enabled {
        return;
    }
    if PROGRESS_LISTENERS.with(|slot| !slot.borrow().is_empty()) {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let start_settings = settings.clone();
    let start = EventListener::new(&window, PAGE_LOADING_START, move |_event: &Event| {
        call(
            &start_settings.global,
            "show",
            &[JsValue::from_f64(start_settings.delay_ms as f64)],
        );
    });
    let global = settings.global.clone();
    let stop = EventListener::new(&window, PAGE_LOADING_STOP, move |_event: &Event| {
        call(&global, "hide", &[]);
    });
    if config::debug_enabled() {
        gloo::console::log!("tilebridge: progress indicator", settings.global.clone());
    }
    PROGRESS_LISTENERS.with(|slot| {
        slot.borrow_mut().extend([start, stop]);
    });
}
