//! Note Bridge WASM Module
//!
//! Boots an embedded note-playing application into the page and plays the
//! matching `<audio id="audio-…">` element whenever the application sends a
//! note name on its `play` port.

pub mod api;
pub mod app;
pub mod bridge;
pub mod config;
pub mod error;
pub mod note;
pub mod registry;
pub mod service_worker;

// Re-export commonly used types
pub use bridge::{AudioBridge, AudioRegistry, Payload, PlayOutcome, Playable};
pub use config::{BridgeConfig, LookupMode, MissingElementPolicy, ServiceWorkerMode};
pub use error::BridgeError;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    init_logger();

    log::info!("Note bridge WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logger() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"[WASM] logger already initialized".into());
    }
}
