//! Audio element registries backed by the page
//!
//! `DomRegistry` resolves ids against the live document at event time.
//! `DomRegistry::snapshot` collects the `<audio>` elements once into an
//! explicit map, which also satisfies [`AudioRegistry`]. `PageRegistry`
//! picks one of the two from the configured [`LookupMode`].

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlMediaElement};

use crate::bridge::{AudioRegistry, Playable};
use crate::config::{BridgeConfig, LookupMode};
use crate::error::{describe_js, BridgeError};

impl Playable for HtmlMediaElement {
    fn play(&self) -> Result<(), String> {
        // The returned promise is dropped: autoplay rejections stay with the browser.
        HtmlMediaElement::play(self)
            .map(|_promise| ())
            .map_err(|e| describe_js(&e))
    }
}

pub fn document() -> Result<Document, BridgeError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or(BridgeError::NoDocument)
}

pub struct DomRegistry {
    document: Document,
}

impl DomRegistry {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Registry over the current window's document
    pub fn from_window() -> Result<Self, BridgeError> {
        Ok(Self::new(document()?))
    }

    /// Collect every `<audio>` element whose id starts with `prefix`
    pub fn snapshot(&self, prefix: &str) -> HashMap<String, HtmlMediaElement> {
        let elements = self.document.get_elements_by_tag_name("audio");
        let mut map = HashMap::new();

        for index in 0..elements.length() {
            let Some(element) = elements.item(index) else { continue };
            let id = element.id();
            if !id.starts_with(prefix) {
                continue;
            }
            if let Ok(media) = element.dyn_into::<HtmlMediaElement>() {
                map.insert(id, media);
            }
        }

        log::debug!("Collected {} audio elements with prefix '{}'", map.len(), prefix);
        map
    }
}

impl AudioRegistry for DomRegistry {
    type Element = HtmlMediaElement;

    fn lookup(&self, element_id: &str) -> Option<HtmlMediaElement> {
        let element = self.document.get_element_by_id(element_id)?;
        match element.dyn_into::<HtmlMediaElement>() {
            Ok(media) => Some(media),
            Err(_) => {
                log::warn!("Element '{}' is not an audio/video element", element_id);
                None
            }
        }
    }
}

pub enum PageRegistry {
    Live(DomRegistry),
    Snapshot(HashMap<String, HtmlMediaElement>),
}

impl PageRegistry {
    pub fn from_config(document: Document, config: &BridgeConfig) -> Self {
        let live = DomRegistry::new(document);
        match config.lookup {
            LookupMode::Live => PageRegistry::Live(live),
            LookupMode::Snapshot => PageRegistry::Snapshot(live.snapshot(&config.element_prefix)),
        }
    }

    pub fn from_window(config: &BridgeConfig) -> Result<Self, BridgeError> {
        Ok(Self::from_config(document()?, config))
    }
}

impl AudioRegistry for PageRegistry {
    type Element = HtmlMediaElement;

    fn lookup(&self, element_id: &str) -> Option<HtmlMediaElement> {
        match self {
            PageRegistry::Live(registry) => registry.lookup(element_id),
            PageRegistry::Snapshot(elements) => elements.lookup(element_id),
        }
    }
}
