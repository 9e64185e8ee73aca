//! Bootstrap configuration
//!
//! Passed from JavaScript as a plain object; every field is optional.
//!
//! ```js
//! bootstrap(Elm.Main, { mountId: "root", missingElement: "fault" });
//! ```

use serde::{Deserialize, Serialize};

use crate::note::DEFAULT_ELEMENT_PREFIX;

/// What to do when a note cannot be played: no registered element, a
/// non-string payload, or an element that refuses `play()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingElementPolicy {
    /// Raise back into the application's event dispatch
    Fault,
    /// Log a warning and carry on
    #[default]
    Ignore,
}

/// How note ids are resolved against the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// `getElementById` on every event
    #[default]
    Live,
    /// Collect the prefixed `<audio>` elements once at startup
    Snapshot,
}

/// End-of-startup service worker handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceWorkerMode {
    #[default]
    Unregister,
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Id of the element the application renders under
    pub mount_id: String,
    /// Name of the outbound port carrying note names
    pub port: String,
    pub element_prefix: String,
    pub missing_element: MissingElementPolicy,
    pub lookup: LookupMode,
    pub service_worker: ServiceWorkerMode,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            mount_id: "root".to_string(),
            port: "play".to_string(),
            element_prefix: DEFAULT_ELEMENT_PREFIX.to_string(),
            missing_element: MissingElementPolicy::default(),
            lookup: LookupMode::default(),
            service_worker: ServiceWorkerMode::default(),
        }
    }
}
