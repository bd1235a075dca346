use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use crate::config;
use crate::dom::js_err;
use tilebridge_core::{plan_reposition, AnimationSettings, PositionSnapshot, RepositionPlan};

/// Plays the FLIP transition for every tile whose box changed between the
/// two snapshots. Returns how many animations were started.
pub(crate) fn animate(
    previous: &PositionSnapshot<Element>,
    current: &PositionSnapshot<Element>,
    settings: &AnimationSettings,
) -> usize {
    let plans = plan_reposition(previous, current, settings.fallback_origin);
    let options = match to_js(&settings.options()) {
        Ok(options) => options,
        Err(err) => {
            gloo::console::warn!("tilebridge: animation options", err);
            return 0;
        }
    };
    let mut started = 0;
    for plan in &plans {
        if !plan.transform.is_finite() {
            gloo::console::warn!("tilebridge: skipped zero-size tile", plan.tile_id.as_str());
            continue;
        }
        match play(plan, &options) {
            Ok(()) => started += 1,
            Err(err) => gloo::console::warn!("tilebridge: animate failed", err),
        }
    }
    if config::debug_enabled() {
        gloo::console::log!("tilebridge: repositioned", started, "of", current.len());
    }
    started
}

fn play(plan: &RepositionPlan<Element>, options: &JsValue) -> Result<(), String> {
    let keyframes = to_js(&plan.keyframes())?;
    let animate = Reflect::get(&plan.handle, &JsValue::from_str("animate"))
        .map_err(js_err)?
        .dyn_into::<Function>()
        .map_err(|_| "Element.animate unavailable".to_string())?;
    animate
        .call2(&plan.handle, &keyframes, options)
        .map_err(js_err)?;
    Ok(())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, String> {
    let json = serde_json::to_string(value).map_err(|err| err.to_string())?;
    js_sys::JSON::parse(&json).map_err(js_err)
}
