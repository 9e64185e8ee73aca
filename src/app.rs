//! Mounting the embedded application and wiring its `play` port
//!
//! The application is an opaque compiled program exposing
//! `init({ node })` and, on the returned instance, `ports.<name>.subscribe(fn)`.
//! Everything is reached through `js_sys::Reflect`.

use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use crate::bridge::AudioBridge;
use crate::config::BridgeConfig;
use crate::error::{describe_js, BridgeError};
use crate::registry::{self, PageRegistry};

type PortCallback = Closure<dyn FnMut(JsValue) -> Result<(), JsValue>>;

/// A running application with its port subscription
///
/// Owns the subscription callback; it stays valid as long as this value
/// lives.
pub struct MountedApp {
    app: JsValue,
    bridge: Rc<AudioBridge<PageRegistry>>,
    _subscription: PortCallback,
}

impl MountedApp {
    pub fn app(&self) -> &JsValue {
        &self.app
    }

    pub fn bridge(&self) -> &AudioBridge<PageRegistry> {
        &self.bridge
    }
}

/// Initialize `program` under the configured mount point and subscribe the
/// audio bridge to its port
pub fn mount(program: &JsValue, config: &BridgeConfig) -> Result<MountedApp, BridgeError> {
    let document = registry::document()?;
    let node = document
        .get_element_by_id(&config.mount_id)
        .ok_or_else(|| BridgeError::MountPointMissing(config.mount_id.clone()))?;

    let app = init_program(program, &node)?;
    let port = resolve_port(&app, &config.port)?;

    let registry = PageRegistry::from_config(document, config);
    let bridge = Rc::new(AudioBridge::from_config(registry, config));
    let handler = Rc::clone(&bridge);
    let subscription: PortCallback = Closure::wrap(Box::new(move |value: JsValue| {
        handler
            .handle_payload(&value)
            .map(|_| ())
            .map_err(JsValue::from)
    }) as Box<dyn FnMut(JsValue) -> Result<(), JsValue>>);

    subscribe(&port, &subscription)?;
    log::info!(
        "Mounted application on #{} and subscribed to port '{}'",
        config.mount_id,
        config.port
    );

    Ok(MountedApp {
        app,
        bridge,
        _subscription: subscription,
    })
}

fn init_program(program: &JsValue, node: &Element) -> Result<JsValue, BridgeError> {
    let init = Reflect::get(program, &JsValue::from_str("init"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| BridgeError::Init("program has no init function".to_string()))?;

    let flags = Object::new();
    Reflect::set(&flags, &JsValue::from_str("node"), node)
        .map_err(|e| BridgeError::Init(describe_js(&e)))?;

    init.call1(program, &flags)
        .map_err(|e| BridgeError::Init(describe_js(&e)))
}

fn resolve_port(app: &JsValue, name: &str) -> Result<JsValue, BridgeError> {
    let ports = Reflect::get(app, &JsValue::from_str("ports"))
        .map_err(|_| BridgeError::PortMissing(name.to_string()))?;
    if !ports.is_object() {
        return Err(BridgeError::PortMissing(name.to_string()));
    }

    let port = Reflect::get(&ports, &JsValue::from_str(name))
        .map_err(|_| BridgeError::PortMissing(name.to_string()))?;
    if port.is_undefined() || port.is_null() {
        return Err(BridgeError::PortMissing(name.to_string()));
    }

    Ok(port)
}

fn subscribe(port: &JsValue, callback: &PortCallback) -> Result<(), BridgeError> {
    let subscribe = Reflect::get(port, &JsValue::from_str("subscribe"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| BridgeError::Init("port has no subscribe function".to_string()))?;

    subscribe
        .call1(port, callback.as_ref())
        .map(|_| ())
        .map_err(|e| BridgeError::Init(describe_js(&e)))
}
