//! Arcade Gallery core crate.
//!
//! Browser-side presentation layer of a casual-games listing site, compiled to
//! WebAssembly. Two leaf components carry the logic and are plain Rust:
//! - `catalog`: genre canonicalization, filtering and pagination of the game list;
//! - `particles`: the decorative particle field with toroidal wraparound.
//!
//! The remaining modules bind those to the page (`gallery`, `toast`, `auth`)
//! and are exported to JS below.

use wasm_bindgen::prelude::*;

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gallery;
pub mod particles;
pub mod toast;

pub use catalog::genre::GENRE_ALIASES;
pub use config::GalleryConfig;
pub use error::GalleryError;
pub use particles::{ParticleAnimator, ParticleOptions};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Sections that get the particle backdrop when the page does not say otherwise.
pub const DEFAULT_PARTICLE_SELECTOR: &str = ".grey-section";

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (module instantiated twice) just keeps the first logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Page entrypoints
// -----------------------------------------------------------------------------

/// Common page setup: navbar state, play gate and section particles.
#[wasm_bindgen]
pub fn init_page(config_json: Option<String>) -> Result<(), JsValue> {
    let config = GalleryConfig::from_json(config_json.as_deref());
    if let Err(e) = auth::update_navbar() {
        log::warn!("navbar not updated: {e}");
    }
    auth::install_play_gate(&config)?;
    let started = particles::init_section_particles(
        DEFAULT_PARTICLE_SELECTOR,
        &ParticleOptions::section_preset(),
    )?;
    log::info!("page ready ({started} particle sections)");
    Ok(())
}

/// Games page: load the catalog once and render the filtered gallery.
#[wasm_bindgen]
pub async fn start_gallery(config_json: Option<String>) -> Result<(), JsValue> {
    let config = GalleryConfig::from_json(config_json.as_deref());
    gallery::start(config).await?;
    Ok(())
}

/// Attach particle backdrops to `selector` (default `.grey-section`). Options
/// are a partial JSON object over the section preset. Returns how many
/// containers were initialized.
#[wasm_bindgen]
pub fn init_particles(selector: Option<String>, options_json: Option<String>) -> Result<u32, JsValue> {
    let options = ParticleOptions::from_json_or(options_json.as_deref(), ParticleOptions::section_preset());
    let selector = selector.as_deref().unwrap_or(DEFAULT_PARTICLE_SELECTOR);
    let started = particles::init_section_particles(selector, &options)?;
    Ok(started as u32)
}

#[wasm_bindgen]
pub fn destroy_particles() {
    particles::destroy_all();
}

/// `kind` is one of error / success / warning / info (default).
#[wasm_bindgen]
pub fn show_toast(message: &str, kind: Option<String>) -> Result<(), JsValue> {
    let kind = toast::ToastKind::parse(kind.as_deref().unwrap_or("info"));
    toast::show_toast(message, kind)?;
    Ok(())
}

#[wasm_bindgen]
pub fn is_play_permitted() -> bool {
    auth::is_play_permitted(auth::current().as_ref())
}

/// Store a mock session for `user_json` (`{"username": .., "isAdmin": ..}`).
#[wasm_bindgen]
pub fn login_user(user_json: &str) -> Result<(), JsValue> {
    let user: auth::AuthUser = serde_json::from_str(user_json).map_err(GalleryError::from)?;
    auth::login(user)?;
    Ok(())
}

#[wasm_bindgen]
pub fn logout_user() -> Result<(), JsValue> {
    auth::logout()?;
    Ok(())
}
