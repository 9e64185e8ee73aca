//! Audio bridge
//!
//! Turns one `play` port value into one playback call:
//! empty payload → nothing; otherwise `prefix + lowercase(note)` is looked up
//! in the registry and the element found there is played.

use std::collections::HashMap;

use wasm_bindgen::JsValue;

use crate::config::{BridgeConfig, MissingElementPolicy};
use crate::error::{describe_js, BridgeError};
use crate::note;

/// Something that can start audio playback
pub trait Playable {
    /// Start playback from the current position. `Err` carries the reason.
    fn play(&self) -> Result<(), String>;
}

/// Resolves element ids to playable elements
pub trait AudioRegistry {
    type Element: Playable;

    fn lookup(&self, element_id: &str) -> Option<Self::Element>;
}

/// Explicit id → element map, built up front instead of read from the page
impl<P: Playable + Clone> AudioRegistry for HashMap<String, P> {
    type Element = P;

    fn lookup(&self, element_id: &str) -> Option<P> {
        self.get(element_id).cloned()
    }
}

/// A value received on the `play` port
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Falsy value: `null`, `undefined`, `""`, `false`, `0`, `NaN`
    Absent,
    Note(String),
    /// Truthy but not a string; holds the JS type name
    Invalid(String),
}

impl Payload {
    pub fn from_js(value: &JsValue) -> Self {
        if value.is_falsy() {
            return Payload::Absent;
        }

        match value.as_string() {
            Some(note) => Payload::Note(note),
            None => Payload::Invalid(describe_js(&value.js_typeof())),
        }
    }
}

impl From<Option<&str>> for Payload {
    fn from(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Payload::Absent,
            Some(note) => Payload::Note(note.to_string()),
        }
    }
}

/// Result of handling one port value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// No note in the payload; nothing was looked up
    Skipped,
    Played { element_id: String },
    /// Element absent and the policy said to ignore it
    Missing { element_id: String },
    /// Element refused to play and the policy said to ignore it
    Failed { element_id: String },
}

pub struct AudioBridge<R: AudioRegistry> {
    registry: R,
    prefix: String,
    policy: MissingElementPolicy,
}

impl<R: AudioRegistry> AudioBridge<R> {
    pub fn new(registry: R, prefix: impl Into<String>, policy: MissingElementPolicy) -> Self {
        Self {
            registry,
            prefix: prefix.into(),
            policy,
        }
    }

    pub fn from_config(registry: R, config: &BridgeConfig) -> Self {
        Self::new(registry, config.element_prefix.clone(), config.missing_element)
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn policy(&self) -> MissingElementPolicy {
        self.policy
    }

    /// Handle a note name; `None` or `""` is a no-op
    pub fn handle_play(&self, note: Option<&str>) -> Result<PlayOutcome, BridgeError> {
        self.dispatch(Payload::from(note))
    }

    /// Handle a raw port value from JavaScript
    pub fn handle_payload(&self, value: &JsValue) -> Result<PlayOutcome, BridgeError> {
        self.dispatch(Payload::from_js(value))
    }

    pub fn dispatch(&self, payload: Payload) -> Result<PlayOutcome, BridgeError> {
        let note = match payload {
            Payload::Absent => return Ok(PlayOutcome::Skipped),
            Payload::Note(note) => note,
            Payload::Invalid(kind) => {
                let err = BridgeError::InvalidPayload(format!(
                    "expected a note name string, got {}",
                    kind
                ));
                return self.apply_policy(err, PlayOutcome::Skipped);
            }
        };

        let Some(element_id) = note::element_id(&self.prefix, &note) else {
            return Ok(PlayOutcome::Skipped);
        };

        let Some(element) = self.registry.lookup(&element_id) else {
            let outcome = PlayOutcome::Missing { element_id: element_id.clone() };
            return self.apply_policy(BridgeError::MissingElement { element_id }, outcome);
        };

        if let Err(reason) = element.play() {
            let outcome = PlayOutcome::Failed { element_id: element_id.clone() };
            return self.apply_policy(BridgeError::Playback { element_id, reason }, outcome);
        }

        log::debug!("Playing '{}' for note '{}'", element_id, note);
        Ok(PlayOutcome::Played { element_id })
    }

    fn apply_policy(
        &self,
        err: BridgeError,
        ignored: PlayOutcome,
    ) -> Result<PlayOutcome, BridgeError> {
        match self.policy {
            MissingElementPolicy::Fault => Err(err),
            MissingElementPolicy::Ignore => {
                log::warn!("{}", err);
                Ok(ignored)
            }
        }
    }
}
