use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom;
use tilebridge_core::{HookConfig, PositionSnapshot};

/// Reads the box of every tracked tile in the document. Rects are copied
/// out immediately, so later layout changes never leak into the result.
pub(crate) fn capture(config: &HookConfig) -> PositionSnapshot<Element> {
    let mut snapshot = PositionSnapshot::new();
    let Some(document) = dom::document() else {
        return snapshot;
    };
    let Ok(nodes) = document.query_selector_all(&config.tile_selector()) else {
        return snapshot;
    };
    for index in 0..nodes.length() {
        let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let Some(tile_id) = dom::tile_id_of(&element, config) else {
            continue;
        };
        let rect = dom::bounding_rect(&element);
        snapshot.insert(tile_id, element, rect);
    }
    snapshot
}
