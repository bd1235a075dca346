use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, Node};

use crate::config;
use crate::dom::{self, DomLocator};
use crate::transport::push_or_warn;
use tilebridge_core::{
    Effect, HookConfig, InteractionController, InteractionEvent, OutboundEvent, Outcome, TileId,
    Transport,
};

thread_local! {
    static CONTROLLER: Rc<RefCell<InteractionController>> =
        Rc::new(RefCell::new(InteractionController::new()));
    static DRAGEND_GUARD: RefCell<Option<EventListener>> = RefCell::new(None);
}

fn controller() -> Rc<RefCell<InteractionController>> {
    CONTROLLER.with(|controller| controller.clone())
}

fn active_options() -> EventListenerOptions {
    EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive: false,
    }
}

/// Runs one event through the shared controller and applies the resulting
/// effects to the DOM. `container` is the set element whose listener fired.
pub(crate) fn dispatch(
    event: InteractionEvent,
    dom_event: &Event,
    container: Option<&Element>,
    transport: Option<&dyn Transport>,
) -> Outcome {
    let config = config::hook_config();
    let Some(document) = dom::document() else {
        return Outcome::default();
    };
    let outcome = {
        let locator = DomLocator {
            document: &document,
            config: &config,
        };
        let controller = controller();
        let mut controller = controller.borrow_mut();
        controller.dispatch(event, &locator)
    };
    if config::debug_enabled() && !outcome.is_empty() {
        gloo::console::log!("tilebridge: dispatch", format!("{:?}", outcome.effects));
    }
    for effect in &outcome.effects {
        if let Err(err) = apply_effect(effect, &config, &document, dom_event, container, transport) {
            gloo::console::warn!("tilebridge: effect failed", err);
        }
    }
    outcome
}

fn apply_effect(
    effect: &Effect,
    config: &HookConfig,
    document: &web_sys::Document,
    dom_event: &Event,
    container: Option<&Element>,
    transport: Option<&dyn Transport>,
) -> Result<(), String> {
    match effect {
        Effect::Mark { tile, mark } => {
            if let Some(element) = dom::find_tile(document, config, tile) {
                dom::add_class(&element, dom::mark_class(config, *mark))?;
            }
        }
        Effect::Unmark { tile, mark } => {
            if let Some(element) = dom::find_tile(document, config, tile) {
                dom::remove_class(&element, dom::mark_class(config, *mark))?;
            }
        }
        Effect::HoverOn { .. } => {
            if let Some(container) = container {
                dom::add_class(container, &config.classes.hover)?;
            }
        }
        Effect::HoverOff { .. } => {
            if let Some(container) = container {
                dom::remove_class(container, &config.classes.hover)?;
            }
        }
        Effect::SetDragPayload { tile } => {
            let transfer = dom_event
                .dyn_ref::<DragEvent>()
                .and_then(|event| event.data_transfer())
                .ok_or_else(|| "drag event without dataTransfer".to_string())?;
            transfer
                .set_data(&config.drag_mime, tile.as_str())
                .map_err(dom::js_err)?;
        }
        Effect::PreventDefault => dom_event.prevent_default(),
        Effect::StopPropagation => dom_event.stop_propagation(),
        Effect::Emit(intent) => {
            let Some(transport) = transport else {
                return Err(format!("no transport for move of {}", intent.tile_id));
            };
            push_or_warn(transport, OutboundEvent::TileMoved(intent.clone()));
        }
    }
    Ok(())
}

fn drag_payload(event: &Event, config: &HookConfig) -> Option<TileId> {
    let transfer = event.dyn_ref::<DragEvent>()?.data_transfer()?;
    let raw = transfer.get_data(&config.drag_mime).ok()?;
    TileId::parse(&raw).ok()
}

/// Draggable role: drag start and clicks on tiles that sit outside any set.
/// Clicks inside a set are left to that set's listener, which sees the
/// clicked tile as the event target.
pub(crate) fn bind_tile(tile: &Element) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    let element = tile.clone();
    listeners.push(EventListener::new(tile, "dragstart", move |event: &Event| {
        let config = config::hook_config();
        let Some(tile) = dom::tile_id_of(&element, &config) else {
            return;
        };
        dispatch(InteractionEvent::DragStart { tile }, event, None, None);
    }));

    let element = tile.clone();
    listeners.push(EventListener::new_with_options(
        tile,
        "click",
        active_options(),
        move |event: &Event| {
            let config = config::hook_config();
            if dom::enclosing_set(&element, &config).is_some() {
                return;
            }
            let Some(tile) = dom::tile_id_of(&element, &config) else {
                return;
            };
            dispatch(
                InteractionEvent::Click {
                    tile: Some(tile),
                    set: None,
                },
                event,
                None,
                None,
            );
        },
    ));

    listeners
}

/// Container role: drag hover, drop, and every click landing in the set.
pub(crate) fn bind_set(set: &Element, transport: Rc<dyn Transport>) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    let element = set.clone();
    listeners.push(EventListener::new_with_options(
        set,
        "dragover",
        active_options(),
        move |event: &Event| {
            let config = config::hook_config();
            let Some(set) = dom::set_id_of(&element, &config) else {
                return;
            };
            dispatch(InteractionEvent::DragOver { set }, event, Some(&element), None);
        },
    ));

    let element = set.clone();
    listeners.push(EventListener::new(set, "dragleave", move |event: &Event| {
        let config = config::hook_config();
        let Some(set) = dom::set_id_of(&element, &config) else {
            return;
        };
        dispatch(InteractionEvent::DragLeave { set }, event, Some(&element), None);
    }));

    let element = set.clone();
    let drop_transport = transport.clone();
    listeners.push(EventListener::new_with_options(
        set,
        "drop",
        active_options(),
        move |event: &Event| {
            let config = config::hook_config();
            let Some(set) = dom::set_id_of(&element, &config) else {
                return;
            };
            let tile = drag_payload(event, &config);
            dispatch(
                InteractionEvent::Drop { tile, set },
                event,
                Some(&element),
                Some(&*drop_transport),
            );
        },
    ));

    let element = set.clone();
    listeners.push(EventListener::new_with_options(
        set,
        "click",
        active_options(),
        move |event: &Event| {
            let config = config::hook_config();
            let Some(set) = dom::set_id_of(&element, &config) else {
                return;
            };
            let tile = dom::event_element(event)
                .and_then(|target| dom::enclosing_tile(&target, &config))
                .filter(|tile| {
                    let node: &Node = tile.as_ref();
                    element.contains(Some(node))
                })
                .and_then(|tile| dom::tile_id_of(&tile, &config));
            dispatch(
                InteractionEvent::Click {
                    tile,
                    set: Some(set),
                },
                event,
                Some(&element),
                Some(&*transport),
            );
        },
    ));

    listeners
}

/// Clears the dragged mark when a drag ends anywhere in the document, even
/// if no drop target fired.
pub(crate) fn install_dragend_guard() {
    let installed = DRAGEND_GUARD.with(|slot| slot.borrow().is_some());
    if installed {
        return;
    }
    let Some(document) = dom::document() else {
        return;
    };
    let listener = EventListener::new(&document, "dragend", move |event: &Event| {
        dispatch(InteractionEvent::DragEnd, event, None, None);
    });
    DRAGEND_GUARD.with(|slot| {
        *slot.borrow_mut() = Some(listener);
    });
}

/// Puts the tile's mark class back after a server patch rewrote its classes.
pub(crate) fn reapply_mark(tile: &Element) {
    let config = config::hook_config();
    let Some(tile_id) = dom::tile_id_of(tile, &config) else {
        return;
    };
    let mark = controller().borrow().mark_of(&tile_id);
    if let Some(mark) = mark {
        if let Err(err) = dom::add_class(tile, dom::mark_class(&config, mark)) {
            gloo::console::warn!("tilebridge: mark restore failed", err);
        }
    }
}

/// Drops controller state for a tile whose element left the document.
pub(crate) fn release_tile(tile: &Element) {
    let config = config::hook_config();
    let Some(tile_id) = dom::tile_id_of(tile, &config) else {
        return;
    };
    let Some(document) = dom::document() else {
        return;
    };
    if dom::find_tile(&document, &config, &tile_id).is_some() {
        return;
    }
    controller().borrow_mut().forget(&tile_id);
}

#[cfg(all(test, target_arch = "wasm32"))]
pub(crate) fn reset_for_tests() {
    *controller().borrow_mut() = InteractionController::new();
}

#[cfg(all(test, target_arch = "wasm32"))]
pub(crate) fn selected_for_tests() -> Option<TileId> {
    controller().borrow().selected().cloned()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use tilebridge_core::{MoveIntent, SetId};
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Default)]
    struct Recorder {
        intents: RefCell<Vec<MoveIntent>>,
    }

    impl Transport for Recorder {
        fn push(&self, event: OutboundEvent) -> Result<(), String> {
            if let OutboundEvent::TileMoved(intent) = event {
                self.intents.borrow_mut().push(intent);
            }
            Ok(())
        }
    }

    fn element(tag: &str, attrs: &[(&str, &str)]) -> HtmlElement {
        let document = dom::document().expect("document available");
        let element = document.create_element(tag).expect("create element");
        for (name, value) in attrs {
            element.set_attribute(name, value).expect("set attribute");
        }
        element.dyn_into::<HtmlElement>().expect("html element")
    }

    fn mount_board(prefix: &str) -> (HtmlElement, HtmlElement, HtmlElement, HtmlElement) {
        let document = dom::document().expect("document available");
        let root = element("div", &[]);
        let source = element("div", &[("data-set-index", &format!("{prefix}-src"))]);
        let target = element("div", &[("data-set-index", &format!("{prefix}-dst"))]);
        let tile = element(
            "div",
            &[
                ("data-tile-id", &format!("{prefix}-tile")),
                ("class", "tile"),
                ("draggable", "true"),
            ],
        );
        source.append_child(&tile).expect("append tile");
        root.append_child(&source).expect("append source");
        root.append_child(&target).expect("append target");
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append root");
        (root, source, target, tile)
    }

    #[wasm_bindgen_test]
    fn click_select_then_click_set_pushes_move() {
        reset_for_tests();
        let (root, source, target, tile) = mount_board("click");
        let recorder = Rc::new(Recorder::default());
        let _source_listeners = bind_set(&source, recorder.clone());
        let _target_listeners = bind_set(&target, recorder.clone());
        let _tile_listeners = bind_tile(&tile);

        tile.click();
        assert!(tile.class_list().contains("selected"));
        assert_eq!(
            selected_for_tests().map(|id| id.to_string()),
            Some("click-tile".to_string())
        );

        target.click();
        assert!(!tile.class_list().contains("selected"));
        assert_eq!(selected_for_tests(), None);
        let intents = recorder.intents.borrow();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].tile_id.as_str(), "click-tile");
        assert_eq!(intents[0].src_set, SetId::parse("click-src").ok());
        assert_eq!(intents[0].dest_set.as_str(), "click-dst");

        root.remove();
    }

    #[wasm_bindgen_test]
    fn double_click_on_tile_deselects_without_push() {
        reset_for_tests();
        let (root, source, _target, tile) = mount_board("twice");
        let recorder = Rc::new(Recorder::default());
        let _listeners = bind_set(&source, recorder.clone());

        tile.click();
        tile.click();

        assert!(!tile.class_list().contains("selected"));
        assert_eq!(selected_for_tests(), None);
        assert!(recorder.intents.borrow().is_empty());

        root.remove();
    }

    #[wasm_bindgen_test]
    fn released_tile_drops_selection() {
        reset_for_tests();
        let (root, source, _target, tile) = mount_board("gone");
        let recorder = Rc::new(Recorder::default());
        let _listeners = bind_set(&source, recorder.clone());

        tile.click();
        assert!(selected_for_tests().is_some());
        tile.remove();
        release_tile(&tile);
        assert_eq!(selected_for_tests(), None);

        root.remove();
    }
}
