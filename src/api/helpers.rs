//! Shared helpers for the WASM API
//!
//! Deserialization of JS-side options and conversion of bridge results into
//! values JavaScript can use.

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::bridge::PlayOutcome;
use crate::config::BridgeConfig;
use crate::error::BridgeError;

/// Deserialize a value from JavaScript, reporting failures as `BridgeError::Config`
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, BridgeError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| BridgeError::Config(format!("{}: {}", error_context, e)))
}

/// Read an optional config object; `undefined`/`null` gives the defaults
pub fn read_config(value: JsValue) -> Result<BridgeConfig, BridgeError> {
    if value.is_undefined() || value.is_null() {
        return Ok(BridgeConfig::default());
    }

    deserialize(value, "Failed to read bridge config")
}

/// Element id that was played, if any
pub fn played_id(outcome: PlayOutcome) -> Option<String> {
    match outcome {
        PlayOutcome::Played { element_id } => Some(element_id),
        PlayOutcome::Skipped | PlayOutcome::Missing { .. } | PlayOutcome::Failed { .. } => None,
    }
}
