//! Browser tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use particle_backdrop::Background;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture() -> (Element, HtmlCanvasElement) {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    container.append_child(&canvas).unwrap();
    document.body().unwrap().append_child(&container).unwrap();
    (container, canvas)
}

#[wasm_bindgen_test]
fn mount_sizes_canvas_and_unmount_cleans_up() {
    let (container, canvas) = fixture();
    let mut background = Background::new(Some(r#"{"seed": 3, "scene_url": null}"#.to_owned())).unwrap();

    background.mount(container.clone(), canvas.clone()).unwrap();
    let window = web_sys::window().unwrap();
    let width = window.inner_width().unwrap().as_f64().unwrap() as u32;
    assert!(background.is_running());
    assert_eq!(background.particle_count(), 50);
    assert_eq!(canvas.width(), width);
    assert!(!background.scene_visible());
    // canvas plus two gradients and two orbs
    assert_eq!(container.child_element_count(), 5);

    background.unmount();
    assert!(!background.is_running());
    assert_eq!(background.particle_count(), 0);
    assert_eq!(container.child_element_count(), 1);
}

#[wasm_bindgen_test]
fn second_mount_is_rejected() {
    let (container, canvas) = fixture();
    let mut background = Background::new(None).unwrap();
    background.mount(container.clone(), canvas.clone()).unwrap();
    assert!(background.mount(container, canvas).is_err());
    background.unmount();
}

#[wasm_bindgen_test]
fn scene_layer_is_inserted_behind_canvas() {
    let (container, canvas) = fixture();
    let mut background = Background::new(Some(r#"{"seed": 1}"#.to_owned())).unwrap();
    background.mount(container.clone(), canvas).unwrap();
    assert!(background.scene_visible());
    let first = container.first_element_child().unwrap();
    assert_eq!(first.tag_name().to_lowercase(), "spline-viewer");
    background.unmount();
    assert!(container.first_element_child().unwrap().tag_name().eq_ignore_ascii_case("canvas"));
}

fn dispatch_resize(window: &web_sys::Window) {
    let event = web_sys::Event::new("resize").unwrap();
    window.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn missing_2d_context_leaves_particle_layer_empty() {
    let (container, canvas) = fixture();
    // A canvas keeps whichever context type it handed out first
    let taken = canvas.get_context("webgl").unwrap();
    if taken.is_none() {
        assert!(canvas.get_context("bitmaprenderer").unwrap().is_some());
    }
    let mut background = Background::new(Some(r#"{"seed": 5, "scene_url": null}"#.to_owned())).unwrap();

    background.mount(container.clone(), canvas.clone()).unwrap();
    assert!(!background.is_running());
    assert_eq!(background.particle_count(), 0);
    assert_eq!(container.child_element_count(), 5);

    background.unmount();
    assert_eq!(container.child_element_count(), 1);
}

#[wasm_bindgen_test]
fn window_resize_resizes_canvas() {
    let (container, canvas) = fixture();
    let window = web_sys::window().unwrap();
    let mut background = Background::new(Some(r#"{"seed": 9, "scene_url": null}"#.to_owned())).unwrap();
    background.mount(container, canvas.clone()).unwrap();

    canvas.set_width(1);
    dispatch_resize(&window);
    dispatch_resize(&window);
    let width = window.inner_width().unwrap().as_f64().unwrap() as u32;
    assert_eq!(canvas.width(), width);
    assert_eq!(background.particle_count(), 50);

    background.unmount();
    canvas.set_width(1);
    dispatch_resize(&window);
    assert_eq!(canvas.width(), 1);
}

#[wasm_bindgen_test]
fn unmount_restores_inline_styles() {
    let (container, canvas) = fixture();
    container.set_attribute("style", "color: red").unwrap();
    let mut background = Background::new(Some(r#"{"seed": 2, "scene_url": null}"#.to_owned())).unwrap();

    background.mount(container.clone(), canvas.clone()).unwrap();
    assert!(container.get_attribute("style").unwrap().contains("z-index: -10"));
    assert!(canvas.get_attribute("style").unwrap().contains("mix-blend-mode: screen"));

    background.unmount();
    assert_eq!(container.get_attribute("style").as_deref(), Some("color: red"));
    assert_eq!(canvas.get_attribute("style"), None);
}

#[wasm_bindgen_test]
fn invalid_config_is_an_error() {
    assert!(Background::new(Some(r#"{"particle_count": 0}"#.to_owned())).is_err());
    assert!(Background::new(Some("not json".to_owned())).is_err());
}
