use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::JsValue;

use crate::dom::js_err;
use tilebridge_core::HookConfig;

const CONFIG_GLOBAL: &str = "__TILEBRIDGE_CONFIG";
const DEBUG_STORAGE_KEY: &str = "tilebridge.debug";

thread_local! {
    static HOOK_CONFIG: RefCell<Option<Rc<HookConfig>>> = RefCell::new(None);
}

/// Page configuration, read once from `window.__TILEBRIDGE_CONFIG`.
pub(crate) fn hook_config() -> Rc<HookConfig> {
    if let Some(config) = HOOK_CONFIG.with(|slot| slot.borrow().clone()) {
        return config;
    }
    let config = Rc::new(load_hook_config());
    HOOK_CONFIG.with(|slot| {
        *slot.borrow_mut() = Some(config.clone());
    });
    config
}

pub(crate) fn debug_enabled() -> bool {
    hook_config().debug || read_storage_flag(DEBUG_STORAGE_KEY)
}

fn load_hook_config() -> HookConfig {
    match read_config_json() {
        Ok(None) => HookConfig::default(),
        Ok(Some(json)) => HookConfig::from_json(&json).unwrap_or_else(|err| {
            gloo::console::warn!("tilebridge: using default config", err);
            HookConfig::default()
        }),
        Err(err) => {
            gloo::console::warn!("tilebridge: config unreadable", err);
            HookConfig::default()
        }
    }
}

fn read_config_json() -> Result<Option<String>, String> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let value = Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).map_err(js_err)?;
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    let json = js_sys::JSON::stringify(&value).map_err(js_err)?;
    Ok(json.as_string())
}

fn read_storage_flag(key: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(Some(storage)) = window.local_storage() else {
        return false;
    };
    let Ok(Some(raw)) = storage.get_item(key) else {
        return false;
    };
    matches!(raw.trim(), "1" | "true")
}
