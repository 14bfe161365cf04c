//! Crate error type. Browser-facing entrypoints convert it to `JsValue` at the
//! `#[wasm_bindgen]` boundary; everything below that returns `Result<_, GalleryError>`.

use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("no global `{0}` available")]
    NoGlobal(&'static str),
    #[error("missing DOM element `{0}`")]
    MissingElement(String),
    #[error("catalog request failed with HTTP status {0}")]
    HttpStatus(u16),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for GalleryError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        GalleryError::Js(msg)
    }
}

impl From<GalleryError> for JsValue {
    fn from(err: GalleryError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
