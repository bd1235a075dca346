//! Classes the host page instantiates from its hook objects.

use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::animator;
use crate::config;
use crate::interaction;
use crate::snapshotter;
use crate::transport::LiveTransport;
use tilebridge_core::{PositionSnapshot, Transport};

/// Animates tiles across a re-render of the board.
#[wasm_bindgen]
pub struct TileContainerHook {
    positions: Option<PositionSnapshot<Element>>,
}

#[wasm_bindgen]
impl TileContainerHook {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TileContainerHook {
        TileContainerHook { positions: None }
    }

    #[wasm_bindgen(js_name = beforeUpdate)]
    pub fn before_update(&mut self) {
        self.positions = Some(snapshotter::capture(&config::hook_config()));
    }

    /// Returns the number of animations started.
    pub fn updated(&mut self) -> usize {
        let config = config::hook_config();
        let previous = self.positions.take().unwrap_or_default();
        let current = snapshotter::capture(&config);
        animator::animate(&previous, &current, &config.animation)
    }
}

impl Default for TileContainerHook {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop target holding tiles, identified by its set attribute.
#[wasm_bindgen]
pub struct SetHook {
    el: Element,
    transport: Rc<dyn Transport>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl SetHook {
    /// `push` is called as `push(event, payload)`, normally bound to the
    /// hook's `pushEvent`.
    #[wasm_bindgen(constructor)]
    pub fn new(el: Element, push: Function) -> SetHook {
        SetHook {
            el,
            transport: Rc::new(LiveTransport::new(push)),
            listeners: Vec::new(),
        }
    }

    pub fn mounted(&mut self) {
        if !self.listeners.is_empty() {
            return;
        }
        self.listeners = interaction::bind_set(&self.el, self.transport.clone());
    }

    pub fn destroyed(&mut self) {
        self.listeners.clear();
    }
}

/// A draggable, selectable tile.
#[wasm_bindgen]
pub struct TileHook {
    el: Element,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl TileHook {
    #[wasm_bindgen(constructor)]
    pub fn new(el: Element) -> TileHook {
        TileHook {
            el,
            listeners: Vec::new(),
        }
    }

    pub fn mounted(&mut self) {
        if !self.listeners.is_empty() {
            return;
        }
        interaction::install_dragend_guard();
        self.listeners = interaction::bind_tile(&self.el);
        interaction::reapply_mark(&self.el);
    }

    pub fn updated(&mut self) {
        interaction::reapply_mark(&self.el);
    }

    pub fn destroyed(&mut self) {
        self.listeners.clear();
        interaction::release_tile(&self.el);
    }
}

/// Remote terminal rendered by the page's xterm.js.
#[cfg(feature = "terminal")]
#[wasm_bindgen]
pub struct TerminalHook {
    el: Element,
    transport: LiveTransport,
    terminal: Option<crate::terminal::MountedTerminal>,
}

#[cfg(feature = "terminal")]
#[wasm_bindgen]
impl TerminalHook {
    #[wasm_bindgen(constructor)]
    pub fn new(el: Element, push: Function) -> TerminalHook {
        TerminalHook {
            el,
            transport: LiveTransport::new(push),
            terminal: None,
        }
    }

    /// Returns false when the terminal could not be mounted.
    pub fn mounted(&mut self) -> bool {
        if self.terminal.is_some() {
            return true;
        }
        match crate::terminal::mount(&self.el, self.transport.clone()) {
            Ok(terminal) => {
                self.terminal = Some(terminal);
                true
            }
            Err(err) => {
                gloo::console::warn!("tilebridge: terminal unavailable", err);
                false
            }
        }
    }

    pub fn destroyed(&mut self) {
        if let Some(terminal) = self.terminal.take() {
            terminal.dispose();
        }
    }
}
