// Browser tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use arcade_gallery::GalleryConfig;
use arcade_gallery::auth::{self, AuthUser, LOGOUT_BOUND_ATTR};
use arcade_gallery::catalog::{FilterState, GenreFilter, load_catalog, try_load_catalog};
use arcade_gallery::gallery::{current_filter_state, push_state};
use arcade_gallery::particles::{ParticleAnimator, ParticleOptions, init_section_particles};
use arcade_gallery::toast::{TOAST_CONTAINER_ID, ToastKind, show_toast};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Event, EventInit, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn section(class: &str) -> HtmlElement {
    let doc = web_sys::window().unwrap().document().unwrap();
    let el: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
    el.set_class_name(class);
    el.set_attribute("style", "width:200px;height:100px;").unwrap();
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn toast_replaces_previous() {
    show_toast("first", ToastKind::Info).unwrap();
    show_toast("<second>", ToastKind::Error).unwrap();
    let doc = web_sys::window().unwrap().document().unwrap();
    let container = doc.get_element_by_id(TOAST_CONTAINER_ID).unwrap();
    assert_eq!(container.child_element_count(), 1);
    assert!(container.inner_html().contains("&lt;second&gt;"));
}

#[wasm_bindgen_test]
fn animator_destroy_is_idempotent() {
    let el = section("animator-host");
    let mut animator = ParticleAnimator::new(&el, ParticleOptions::default()).unwrap();
    assert!(animator.is_running());
    assert_eq!(el.query_selector_all("canvas").unwrap().length(), 1);
    animator.destroy();
    animator.destroy();
    assert!(!animator.is_running());
    assert_eq!(el.query_selector_all("canvas").unwrap().length(), 0);
}

#[wasm_bindgen_test]
fn sections_initialize_once() {
    section("test-grey-section");
    section("test-grey-section");
    let opts = ParticleOptions::section_preset();
    assert_eq!(init_section_particles(".test-grey-section", &opts).unwrap(), 2);
    assert_eq!(init_section_particles(".test-grey-section", &opts).unwrap(), 0);
    assert_eq!(init_section_particles(".missing-section", &opts).unwrap(), 0);
    arcade_gallery::particles::destroy_all();
}

fn set_url(query: &str) {
    let win = web_sys::window().unwrap();
    let path = win.location().pathname().unwrap();
    win.history()
        .unwrap()
        .push_state_with_url(&JsValue::NULL, "", Some(&format!("{path}{query}")))
        .unwrap();
}

#[wasm_bindgen_test]
async fn missing_catalog_loads_empty() {
    assert!(load_catalog("/no-such-catalog.json").await.is_empty());
    assert!(try_load_catalog("/no-such-catalog.json").await.is_err());
}

#[wasm_bindgen_test]
async fn malformed_catalog_loads_empty() {
    assert!(load_catalog("data:application/json,%7Bnot%20json").await.is_empty());
}

#[wasm_bindgen_test]
async fn empty_catalog_is_not_a_failure() {
    let records = try_load_catalog("data:application/json,%7B%22data%22%3A%7B%7D%7D").await.unwrap();
    assert!(records.is_empty());
}

#[wasm_bindgen_test]
fn filter_state_follows_url() {
    set_url("?cat=abenteuer&page=2");
    let state = current_filter_state().unwrap();
    assert_eq!(state.genre, GenreFilter::from_param(Some("Adventure Quest")));
    assert_eq!(state.page_index, 2);

    let puzzle = state.with_genre(GenreFilter::from_param(Some("puzzle")));
    push_state(&puzzle).unwrap();
    assert_eq!(current_filter_state().unwrap(), puzzle);

    push_state(&FilterState::default()).unwrap();
    assert_eq!(web_sys::window().unwrap().location().search().unwrap(), "");
}

#[wasm_bindgen_test]
fn logged_out_play_click_is_blocked() {
    auth::logout().unwrap();
    let config = GalleryConfig { redirect_delay_ms: 600_000, ..GalleryConfig::default() };
    auth::install_play_gate(&config).unwrap();

    let holder = section("play-button");
    let link = web_sys::window().unwrap().document().unwrap().create_element("a").unwrap();
    link.set_attribute("href", "#play").unwrap();
    holder.append_child(&link).unwrap();

    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let click = Event::new_with_event_init_dict("click", &init).unwrap();
    link.dispatch_event(&click).unwrap();

    assert!(click.default_prevented());
    let doc = web_sys::window().unwrap().document().unwrap();
    let container = doc.get_element_by_id(TOAST_CONTAINER_ID).unwrap();
    assert_eq!(container.child_element_count(), 1);
    assert!(container.inner_html().contains("Please log in to play games"));
    holder.remove();
}

#[wasm_bindgen_test]
fn navbar_binds_logout_once() {
    let doc = web_sys::window().unwrap().document().unwrap();
    let button = doc.create_element("button").unwrap();
    button.set_id("logoutButton");
    doc.body().unwrap().append_child(&button).unwrap();

    auth::login(AuthUser { username: "mia".into(), ..AuthUser::default() }).unwrap();
    auth::update_navbar().unwrap();
    assert!(button.has_attribute(LOGOUT_BOUND_ATTR));
    // A second pass finds the marker and leaves the button alone.
    button.set_attribute(LOGOUT_BOUND_ATTR, "first").unwrap();
    auth::update_navbar().unwrap();
    assert_eq!(button.get_attribute(LOGOUT_BOUND_ATTR).as_deref(), Some("first"));

    auth::logout().unwrap();
    button.remove();
}
