//! Mock login state kept in localStorage, the play gate that depends on it,
//! and the navbar greeting. There is no real authentication here: the stored
//! flag is trusted as-is.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, Storage, window};

use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::toast::{ToastKind, notify};

pub const AUTH_STORAGE_KEY: &str = "authState";
pub const PROTECTED_SELECTOR: &str = ".play-button button, .play-button a, #ctaButton";
const CTA_ID: &str = "ctaButton";
const GAME_URL_ATTR: &str = "data-game-url";
/// Set on the logout button once its click handler is installed.
pub const LOGOUT_BOUND_ATTR: &str = "data-logout-bound";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Any other profile fields, kept as given.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    #[serde(default)]
    pub is_logged_in: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

impl AuthState {
    pub fn for_user(user: AuthUser) -> Self {
        Self {
            is_logged_in: true,
            is_admin: user.is_admin,
            token: user.token.clone(),
            user: Some(user),
        }
    }

    /// Decode the stored value. Corrupt JSON counts as logged out.
    pub fn from_stored(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        match serde_json::from_str(raw) {
            Ok(state) => Some(state),
            Err(e) => {
                log::warn!("ignoring corrupt {AUTH_STORAGE_KEY}: {e}");
                None
            }
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.username.as_str())
            .filter(|name| !name.is_empty())
    }
}

/// Whether a play action may proceed.
pub fn is_play_permitted(state: Option<&AuthState>) -> bool {
    state.is_some_and(|s| s.is_logged_in && s.username().is_some())
}

/// What a click on a protected element should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayAction {
    /// Block, warn and send the visitor to the login page.
    RequireLogin,
    /// Cancel the default action and go here instead.
    Navigate(String),
    /// Let the browser follow the element's own link.
    FollowLink,
}

pub fn decide_play(
    permitted: bool,
    is_cta: bool,
    game_url: Option<&str>,
    config: &GalleryConfig,
) -> PlayAction {
    if !permitted {
        return PlayAction::RequireLogin;
    }
    if is_cta {
        return PlayAction::Navigate(config.games_url.clone());
    }
    match game_url.filter(|u| !u.is_empty()) {
        Some(url) => PlayAction::Navigate(url.to_string()),
        None => PlayAction::FollowLink,
    }
}

// --- localStorage -------------------------------------------------------------

fn local_storage() -> Result<Storage> {
    window()
        .ok_or(GalleryError::NoGlobal("window"))?
        .local_storage()?
        .ok_or(GalleryError::NoGlobal("localStorage"))
}

/// Current stored auth state, if any.
pub fn current() -> Option<AuthState> {
    let raw = local_storage().ok()?.get_item(AUTH_STORAGE_KEY).ok()?;
    AuthState::from_stored(raw.as_deref())
}

pub fn login(user: AuthUser) -> Result<()> {
    let state = AuthState::for_user(user);
    local_storage()?.set_item(AUTH_STORAGE_KEY, &serde_json::to_string(&state)?)?;
    log::info!("logged in as {}", state.username().unwrap_or("<anonymous>"));
    Ok(())
}

pub fn logout() -> Result<()> {
    local_storage()?.remove_item(AUTH_STORAGE_KEY)?;
    log::info!("logged out");
    Ok(())
}

// --- Page wiring ----------------------------------------------------------------

fn redirect_later(url: String, delay_ms: i32) {
    let Some(win) = window() else { return };
    let go = Closure::once_into_js(move || {
        if let Some(w) = window() {
            let _ = w.location().set_href(&url);
        }
    });
    if let Err(e) = win.set_timeout_with_callback_and_timeout_and_arguments_0(go.unchecked_ref(), delay_ms) {
        log::warn!("redirect not scheduled: {:?}", e);
    }
}

fn navigate(url: &str) {
    if let Some(w) = window() {
        if let Err(e) = w.location().set_href(url) {
            log::warn!("navigation to {url} failed: {:?}", e);
        }
    }
}

fn on_protected_click(evt: &Event, config: &GalleryConfig) {
    let Some(target) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    let Ok(Some(protected)) = target.closest(PROTECTED_SELECTOR) else {
        return;
    };
    let game_url = protected.get_attribute(GAME_URL_ATTR);
    let action = decide_play(
        is_play_permitted(current().as_ref()),
        protected.id() == CTA_ID,
        game_url.as_deref(),
        config,
    );
    match action {
        PlayAction::RequireLogin => {
            evt.prevent_default();
            notify("Please log in to play games", ToastKind::Warning);
            redirect_later(config.login_url.clone(), config.redirect_delay_ms);
        }
        PlayAction::Navigate(url) => {
            evt.prevent_default();
            navigate(&url);
        }
        PlayAction::FollowLink => {}
    }
}

/// Delegated click listener gating every play control on the page.
pub fn install_play_gate(config: &GalleryConfig) -> Result<()> {
    let body = window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .ok_or(GalleryError::NoGlobal("document.body"))?;
    let config = config.clone();
    let closure = Closure::wrap(Box::new(move |evt: Event| {
        on_protected_click(&evt, &config);
    }) as Box<dyn FnMut(_)>);
    body.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Toggle the login button / greeting according to the stored state.
pub fn update_navbar() -> Result<()> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or(GalleryError::NoGlobal("document"))?;
    let login_btn = doc.query_selector(".login-btn")?;
    let greeting = doc.query_selector(".username-display")?;
    let state = current();

    match state.as_ref().filter(|s| is_play_permitted(Some(*s))) {
        Some(s) => {
            if let Some(holder) = doc.get_element_by_id("usernameHolder") {
                holder.set_text_content(Some(&format!("Welcome, {}", s.username().unwrap_or_default())));
            }
            if let Some(btn) = &login_btn {
                btn.class_list().add_1("d-none")?;
            }
            if let Some(el) = &greeting {
                el.class_list().remove_1("d-none")?;
            }
            if let Some(logout_btn) = doc
                .get_element_by_id("logoutButton")
                .filter(|b| !b.has_attribute(LOGOUT_BOUND_ATTR))
            {
                logout_btn.set_attribute(LOGOUT_BOUND_ATTR, "")?;
                let closure = Closure::wrap(Box::new(move |_evt: Event| {
                    if let Err(e) = logout() {
                        log::warn!("logout failed: {e}");
                    }
                    notify("Logged out successfully!", ToastKind::Success);
                    if let Some(w) = window() {
                        let _ = w.location().reload();
                    }
                }) as Box<dyn FnMut(_)>);
                logout_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }
        None => {
            if let Some(btn) = &login_btn {
                btn.class_list().remove_1("d-none")?;
            }
            if let Some(el) = &greeting {
                el.class_list().add_1("d-none")?;
            }
        }
    }
    Ok(())
}
