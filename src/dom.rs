use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event};

use tilebridge_core::{HookConfig, Mark, Rect, SetId, TileId, TileLocator};

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}

pub(crate) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub(crate) fn bounding_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
}

pub(crate) fn tile_id_of(element: &Element, config: &HookConfig) -> Option<TileId> {
    let raw = element.get_attribute(&config.tile_attr)?;
    TileId::parse(&raw).ok()
}

pub(crate) fn set_id_of(element: &Element, config: &HookConfig) -> Option<SetId> {
    let raw = element.get_attribute(&config.set_attr)?;
    SetId::parse(&raw).ok()
}

/// Looks a tile up by id without building a selector from untrusted text.
pub(crate) fn find_tile(document: &Document, config: &HookConfig, tile: &TileId) -> Option<Element> {
    let nodes = document.query_selector_all(&config.tile_selector()).ok()?;
    for index in 0..nodes.length() {
        let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        if element.get_attribute(&config.tile_attr).as_deref() == Some(tile.as_str()) {
            return Some(element);
        }
    }
    None
}

pub(crate) fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

pub(crate) fn enclosing_tile(element: &Element, config: &HookConfig) -> Option<Element> {
    element.closest(&config.tile_selector()).ok().flatten()
}

pub(crate) fn enclosing_set(element: &Element, config: &HookConfig) -> Option<Element> {
    element.closest(&config.set_selector()).ok().flatten()
}

pub(crate) fn mark_class(config: &HookConfig, mark: Mark) -> &str {
    match mark {
        Mark::Selected => &config.classes.selected,
        Mark::Dragged => &config.classes.dragged,
    }
}

pub(crate) fn add_class(element: &Element, class: &str) -> Result<(), String> {
    element.class_list().add_1(class).map_err(js_err)
}

pub(crate) fn remove_class(element: &Element, class: &str) -> Result<(), String> {
    element.class_list().remove_1(class).map_err(js_err)
}

/// Resolves tiles against the live document.
pub(crate) struct DomLocator<'a> {
    pub(crate) document: &'a Document,
    pub(crate) config: &'a HookConfig,
}

impl TileLocator for DomLocator<'_> {
    fn contains(&self, tile: &TileId) -> bool {
        find_tile(self.document, self.config, tile).is_some()
    }

    fn set_of(&self, tile: &TileId) -> Option<SetId> {
        let element = find_tile(self.document, self.config, tile)?;
        set_id_of(&element.parent_element()?, self.config)
    }
}
