//! Toast notifications. One toast is visible at a time, top-right, and hides
//! itself after `TOAST_DELAY_MS`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, window};

use crate::error::{GalleryError, Result};
use crate::gallery::markup::escape_html;

pub const TOAST_CONTAINER_ID: &str = "globalToastContainer";
pub const TOAST_DELAY_MS: i32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
    Warning,
    Info,
}

impl ToastKind {
    /// Unknown names show as info.
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "error" => ToastKind::Error,
            "success" => ToastKind::Success,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        }
    }

    pub fn background_class(self) -> &'static str {
        match self {
            ToastKind::Error => "bg-danger text-white",
            ToastKind::Success => "bg-success text-white",
            ToastKind::Warning => "bg-warning text-dark",
            ToastKind::Info => "bg-info text-white",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            ToastKind::Error => "fas fa-exclamation-circle",
            ToastKind::Success => "fas fa-check-circle",
            ToastKind::Warning => "fas fa-exclamation-triangle",
            ToastKind::Info => "fas fa-info-circle",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ToastKind::Error => "Error",
            ToastKind::Success => "Success",
            ToastKind::Warning => "Warning",
            ToastKind::Info => "Info",
        }
    }
}

/// Inner markup of a toast. The message is escaped.
pub fn toast_markup(message: &str, kind: ToastKind) -> String {
    let bg = kind.background_class();
    format!(
        "<div class=\"toast-header {bg} border-0\">\
           <i class=\"{icon} me-2\"></i>\
           <strong class=\"me-auto\">{title}</strong>\
           <button type=\"button\" class=\"btn-close btn-close-white\" data-bs-dismiss=\"toast\" aria-label=\"Close\"></button>\
         </div>\
         <div class=\"toast-body py-3\">\
           <div class=\"d-flex align-items-center\"><div class=\"flex-grow-1\">{message}</div></div>\
         </div>",
        icon = kind.icon_class(),
        title = kind.title(),
        message = escape_html(message),
    )
}

/// Show `message`, replacing any toast currently on screen.
pub fn show_toast(message: &str, kind: ToastKind) -> Result<()> {
    let win = window().ok_or(GalleryError::NoGlobal("window"))?;
    let doc = win.document().ok_or(GalleryError::NoGlobal("document"))?;
    let body = doc.body().ok_or(GalleryError::NoGlobal("document.body"))?;

    let container = match doc.get_element_by_id(TOAST_CONTAINER_ID) {
        Some(el) => el,
        None => {
            let el = doc.create_element("div")?;
            el.set_id(TOAST_CONTAINER_ID);
            el.set_class_name("position-fixed top-0 end-0 p-3");
            el.set_attribute("style", "z-index:1100;")?;
            body.append_child(&el)?;
            el
        }
    };
    container.set_inner_html("");

    let toast: HtmlElement = doc.create_element("div")?.dyn_into().map_err(JsValue::from)?;
    toast.set_class_name(&format!(
        "toast show align-items-center border-0 shadow-lg {}",
        kind.background_class()
    ));
    toast.set_attribute("role", "alert")?;
    toast.set_attribute("aria-live", "assertive")?;
    toast.set_attribute("aria-atomic", "true")?;
    toast.set_attribute("style", "min-width:320px; font-size:14px;")?;
    toast.set_inner_html(&toast_markup(message, kind));
    container.append_child(&toast)?;

    let hide_target = toast.clone();
    let hide = Closure::once_into_js(move || hide_target.remove());
    win.set_timeout_with_callback_and_timeout_and_arguments_0(hide.unchecked_ref(), TOAST_DELAY_MS)?;

    log::debug!("toast ({}): {message}", kind.title());
    Ok(())
}

/// Fire-and-forget variant for glue code: failures are only logged.
pub fn notify(message: &str, kind: ToastKind) {
    if let Err(e) = show_toast(message, kind) {
        log::warn!("toast not shown: {e}");
    }
}
