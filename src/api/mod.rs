//! JavaScript-facing API
//!
//! - `bootstrap`: mount the application, subscribe the audio bridge, run the
//!   service worker hook
//! - `playNote`: drive the bridge directly against the page
//! - `elementIdForNote`: id derivation only

pub mod helpers;

use wasm_bindgen::prelude::*;

use crate::app::{self, MountedApp};
use crate::bridge::AudioBridge;
use crate::note;
use crate::registry::PageRegistry;
use crate::service_worker;

/// Handle to the mounted application. Keep it alive for the page lifetime;
/// dropping it releases the port subscription.
#[wasm_bindgen]
pub struct AppHandle {
    inner: MountedApp,
}

#[wasm_bindgen]
impl AppHandle {
    /// The application instance returned by `init`
    #[wasm_bindgen(getter)]
    pub fn app(&self) -> JsValue {
        self.inner.app().clone()
    }

    /// Play a note through the subscribed bridge, returning the element id played
    #[wasm_bindgen(js_name = playNote)]
    pub fn play_note(&self, note: JsValue) -> Result<Option<String>, JsValue> {
        let outcome = self.inner.bridge().handle_payload(&note)?;
        Ok(helpers::played_id(outcome))
    }
}

/// Mount `program` (an object with `init({ node })`) and wire its play port
#[wasm_bindgen]
pub fn bootstrap(program: JsValue, config: JsValue) -> Result<AppHandle, JsValue> {
    let config = helpers::read_config(config)?;
    let inner = app::mount(&program, &config)?;

    service_worker::apply(config.service_worker);

    Ok(AppHandle { inner })
}

/// Play a note against the current page without a mounted application
#[wasm_bindgen(js_name = playNote)]
pub fn play_note(note: JsValue, config: JsValue) -> Result<Option<String>, JsValue> {
    let config = helpers::read_config(config)?;
    let bridge = AudioBridge::from_config(PageRegistry::from_window(&config)?, &config);

    let outcome = bridge.handle_payload(&note)?;
    Ok(helpers::played_id(outcome))
}

#[wasm_bindgen(js_name = elementIdForNote)]
pub fn element_id_for_note(note: &str) -> Option<String> {
    note::default_element_id(note)
}
