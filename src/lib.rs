//! Browser hooks for a server-rendered tile board.
//!
//! The host page wires its live-view hook objects to the exported classes:
//!
//! ```js
//! import init, { SetHook, TileHook, TileContainerHook, TerminalHook } from "./tilebridge.js";
//! await init();
//! const hooks = {
//!   SetHook: {
//!     mounted() { this.rs = new SetHook(this.el, (e, p) => this.pushEvent(e, p)); this.rs.mounted(); },
//!     destroyed() { this.rs.destroyed(); this.rs.free(); },
//!   },
//!   // ...
//! };
//! ```
//!
//! `web/hooks.js` carries the complete glue.

mod animator;
mod config;
mod dom;
mod hooks;
mod interaction;
#[cfg(feature = "progress")]
mod progress;
mod snapshotter;
#[cfg(feature = "terminal")]
mod terminal;
mod transport;

use wasm_bindgen::prelude::*;

pub use hooks::{SetHook, TileContainerHook, TileHook};
#[cfg(feature = "terminal")]
pub use hooks::TerminalHook;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    interaction::install_dragend_guard();
    #[cfg(feature = "progress")]
    progress::install(&config::hook_config().progress);
    if config::debug_enabled() {
        gloo::console::log!("tilebridge: started");
    }
}
