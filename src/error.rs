//! Error types for the audio bridge
//!
//! One runtime failure mode (a note with no registered element) plus the
//! startup failures of mounting the application.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The derived element id does not resolve to a playable element
    #[error("No audio element registered with id '{element_id}'")]
    MissingElement { element_id: String },

    /// Port delivered a truthy value that is not a string
    #[error("Invalid play payload: {0}")]
    InvalidPayload(String),

    /// The element refused to start playback
    #[error("Playback failed on '{element_id}': {reason}")]
    Playback { element_id: String, reason: String },

    #[error("Mount point '{0}' not found in document")]
    MountPointMissing(String),

    #[error("Application has no port named '{0}'")]
    PortMissing(String),

    #[error("No window or document available")]
    NoDocument,

    #[error("Application init failed: {0}")]
    Init(String),

    #[error("Invalid bridge config: {0}")]
    Config(String),
}

impl From<BridgeError> for JsValue {
    fn from(err: BridgeError) -> Self {
        let msg = err.to_string();
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    }
}

/// Render a thrown JS value for an error message
pub(crate) fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
