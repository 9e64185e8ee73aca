#![cfg(target_arch = "wasm32")]

//! Browser tests
//!
//! Run with `wasm-pack test --headless --firefox`. These exercise the DOM
//! registry and the mount path against a real document.

use js_sys::{Function, Object, Promise, Reflect};
use note_bridge_wasm::api::{bootstrap, element_id_for_note, play_note};
use note_bridge_wasm::registry::DomRegistry;
use note_bridge_wasm::service_worker::catch_rejection;
use note_bridge_wasm::{AudioRegistry, Payload};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlAudioElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn add_element(tag: &str, id: &str) {
    let doc = document();
    if doc.get_element_by_id(id).is_some() {
        return;
    }
    let element = doc.create_element(tag).unwrap();
    element.set_id(id);
    doc.body().unwrap().append_child(&element).unwrap();
}

/// Audio element whose `play` counts calls instead of touching the audio device
fn counting_audio(id: &str) -> Element {
    add_element("audio", id);
    let element = document().get_element_by_id(id).unwrap();
    let play = Function::new_no_args(
        "this.playCount = (this.playCount || 0) + 1; return Promise.resolve();",
    );
    Reflect::set(&element, &JsValue::from_str("play"), &play).unwrap();
    Reflect::set(&element, &JsValue::from_str("playCount"), &JsValue::from_f64(0.0)).unwrap();
    element
}

fn play_count(element: &Element) -> f64 {
    Reflect::get(element, &JsValue::from_str("playCount"))
        .unwrap()
        .as_f64()
        .unwrap_or(0.0)
}

/// Program stub: `init` records the node, the play port records its subscriber
fn fake_program() -> JsValue {
    let make = Function::new_no_args(
        r#"
        var program = { node: null, subscriber: null };
        program.init = function (flags) {
            program.node = flags.node;
            return {
                ports: {
                    play: { subscribe: function (fn) { program.subscriber = fn; } }
                }
            };
        };
        return program;
        "#,
    );
    make.call0(&JsValue::NULL).unwrap()
}

fn config(pairs: &[(&str, &str)]) -> JsValue {
    let object = Object::new();
    for (key, value) in pairs {
        Reflect::set(&object, &JsValue::from_str(key), &JsValue::from_str(value)).unwrap();
    }
    object.into()
}

fn subscriber(program: &JsValue) -> Function {
    Reflect::get(program, &JsValue::from_str("subscriber"))
        .unwrap()
        .dyn_into::<Function>()
        .unwrap()
}

#[wasm_bindgen_test]
fn test_element_id_for_note() {
    assert_eq!(element_id_for_note("D#").as_deref(), Some("audio-d#"));
    assert_eq!(element_id_for_note(""), None);
}

#[wasm_bindgen_test]
fn test_payload_truthiness() {
    assert_eq!(Payload::from_js(&JsValue::NULL), Payload::Absent);
    assert_eq!(Payload::from_js(&JsValue::UNDEFINED), Payload::Absent);
    assert_eq!(Payload::from_js(&JsValue::from_str("")), Payload::Absent);
    assert_eq!(Payload::from_js(&JsValue::from_str("G")), Payload::Note("G".to_string()));
    assert_eq!(
        Payload::from_js(&JsValue::from_f64(3.0)),
        Payload::Invalid("number".to_string())
    );
}

#[wasm_bindgen_test]
fn test_dom_registry_finds_audio_by_id() {
    add_element("audio", "audio-b");
    let registry = DomRegistry::from_window().unwrap();

    assert!(registry.lookup("audio-b").is_some());
    assert!(registry.lookup("audio-nothing").is_none());
}

#[wasm_bindgen_test]
fn test_dom_registry_rejects_non_media_elements() {
    add_element("div", "audio-div");
    let registry = DomRegistry::from_window().unwrap();

    assert!(registry.lookup("audio-div").is_none());
}

#[wasm_bindgen_test]
fn test_snapshot_collects_prefixed_audio() {
    add_element("audio", "audio-e");
    let extra = HtmlAudioElement::new().unwrap();
    extra.set_id("other-e");
    document().body().unwrap().append_child(&extra).unwrap();

    let snapshot = DomRegistry::from_window().unwrap().snapshot("audio-");

    assert!(snapshot.contains_key("audio-e"));
    assert!(!snapshot.contains_key("other-e"));
}

#[wasm_bindgen_test]
fn test_play_note_skips_empty_and_missing() {
    assert_eq!(play_note(JsValue::from_str(""), JsValue::UNDEFINED).unwrap(), None);
    assert_eq!(play_note(JsValue::NULL, JsValue::UNDEFINED).unwrap(), None);
    assert_eq!(play_note(JsValue::from_str("Q"), JsValue::UNDEFINED).unwrap(), None);
    assert!(play_note(JsValue::from_str("Q"), config(&[("missingElement", "fault")])).is_err());
}

#[wasm_bindgen_test]
fn test_play_note_plays_registered_element() {
    let audio = counting_audio("audio-g");

    let played = play_note(JsValue::from_str("G"), JsValue::UNDEFINED).unwrap();

    assert_eq!(played.as_deref(), Some("audio-g"));
    assert_eq!(play_count(&audio), 1.0);
}

#[wasm_bindgen_test]
fn test_subscribed_port_plays_registered_element() {
    add_element("div", "sharp-root");
    let audio = counting_audio("audio-a#");
    let program = fake_program();
    let options = config(&[
        ("mountId", "sharp-root"),
        ("missingElement", "fault"),
        ("serviceWorker", "keep"),
    ]);

    let handle = bootstrap(program.clone(), options).unwrap();

    let send = subscriber(&program);
    assert!(send.call1(&JsValue::NULL, &JsValue::from_str("A#")).is_ok());
    assert_eq!(play_count(&audio), 1.0);

    let played = handle.play_note(JsValue::from_str("a#")).unwrap();
    assert_eq!(played.as_deref(), Some("audio-a#"));
    assert_eq!(play_count(&audio), 2.0);
}

#[wasm_bindgen_test]
fn test_snapshot_lookup_ignores_late_elements() {
    add_element("div", "snapshot-root");
    let early = counting_audio("audio-f");
    let program = fake_program();
    let options = config(&[
        ("mountId", "snapshot-root"),
        ("lookup", "snapshot"),
        ("serviceWorker", "keep"),
    ]);

    let handle = bootstrap(program, options).unwrap();
    let late = counting_audio("audio-late");

    assert_eq!(handle.play_note(JsValue::from_str("F")).unwrap().as_deref(), Some("audio-f"));
    assert_eq!(handle.play_note(JsValue::from_str("Late")).unwrap(), None);
    assert_eq!(play_count(&early), 1.0);
    assert_eq!(play_count(&late), 0.0);
}

#[wasm_bindgen_test]
async fn test_rejected_promise_is_caught() {
    let rejected = Promise::reject(&JsValue::from_str("unregister denied"));

    let settled = JsFuture::from(catch_rejection(&rejected, "unregister")).await;

    assert!(settled.is_ok());
}

#[wasm_bindgen_test]
fn test_bootstrap_mounts_and_subscribes() {
    add_element("div", "root");
    let program = fake_program();

    let handle = bootstrap(program.clone(), config(&[("serviceWorker", "keep")])).unwrap();

    let node = Reflect::get(&program, &JsValue::from_str("node")).unwrap();
    assert_eq!(node.dyn_into::<web_sys::Element>().unwrap().id(), "root");
    assert!(handle.app().is_object());

    let send = subscriber(&program);
    assert!(send.call1(&JsValue::NULL, &JsValue::from_str("")).is_ok());
    assert!(send.call1(&JsValue::NULL, &JsValue::NULL).is_ok());
    // Default policy ignores unregistered notes
    assert!(send.call1(&JsValue::NULL, &JsValue::from_str("Zz")).is_ok());
}

#[wasm_bindgen_test]
fn test_fault_policy_throws_into_dispatch() {
    add_element("div", "fault-root");
    let program = fake_program();
    let options = config(&[
        ("mountId", "fault-root"),
        ("missingElement", "fault"),
        ("serviceWorker", "keep"),
    ]);

    let _handle = bootstrap(program.clone(), options).unwrap();

    let send = subscriber(&program);
    assert!(send.call1(&JsValue::NULL, &JsValue::from_str("Zz")).is_err());
}

#[wasm_bindgen_test]
fn test_bootstrap_without_mount_point_fails() {
    let program = fake_program();
    let result = bootstrap(program, config(&[("mountId", "no-such-node")]));
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn test_bootstrap_without_port_fails() {
    add_element("div", "root");
    let program = Function::new_no_args("return { init: function () { return { ports: {} }; } };")
        .call0(&JsValue::NULL)
        .unwrap();

    let result = bootstrap(program, config(&[("serviceWorker", "keep")]));
    assert!(result.is_err());
}
