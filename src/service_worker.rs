//! Service worker lifecycle hook run at the end of bootstrap
//!
//! Only unregistering is supported: offline caching stays off unless the
//! page opts in elsewhere.

use js_sys::Promise;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::ServiceWorkerRegistration;

use crate::config::ServiceWorkerMode;
use crate::error::describe_js;

pub fn apply(mode: ServiceWorkerMode) {
    match mode {
        ServiceWorkerMode::Unregister => unregister(),
        ServiceWorkerMode::Keep => log::debug!("Leaving service worker registration untouched"),
    }
}

/// Unregister the active service worker once it is ready. Never fails.
pub fn unregister() {
    let Some(window) = web_sys::window() else { return };
    let navigator = window.navigator();

    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker"))
        .unwrap_or(false);
    if !supported {
        log::debug!("Service workers not supported, nothing to unregister");
        return;
    }

    let ready = match navigator.service_worker().ready() {
        Ok(promise) => promise,
        Err(e) => {
            log::warn!("Service worker not available: {}", describe_js(&e));
            return;
        }
    };

    let on_ready: Closure<dyn FnMut(JsValue)> = Closure::once(|registration: JsValue| {
        match registration.dyn_into::<ServiceWorkerRegistration>() {
            Ok(registration) => match registration.unregister() {
                Ok(pending) => {
                    let done: Closure<dyn FnMut(JsValue)> = Closure::once(|_: JsValue| {
                        log::info!("Service worker unregistered");
                    });
                    let _ = catch_rejection(&pending.then(&done), "Service worker unregister failed");
                    done.forget();
                }
                Err(e) => log::warn!("Service worker unregister failed: {}", describe_js(&e)),
            },
            Err(other) => log::warn!("Unexpected ready value: {}", describe_js(&other)),
        }
    });

    let _ = catch_rejection(&ready.then(&on_ready), "Service worker not ready");

    // The promise outlives this call; the callback runs at most once.
    on_ready.forget();
}

/// Log a rejection of `promise` instead of leaving it unhandled.
///
/// Returns the settled-either-way promise.
pub fn catch_rejection(promise: &Promise, context: &'static str) -> Promise {
    let on_error: Closure<dyn FnMut(JsValue)> = Closure::once(move |e: JsValue| {
        log::warn!("{}: {}", context, describe_js(&e));
    });
    let handled = promise.catch(&on_error);
    on_error.forget();
    handled
}
