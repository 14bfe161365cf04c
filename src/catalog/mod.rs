//! Game catalog: record model, loading, genre filtering and pagination.
//!
//! The catalog is a static JSON document shaped as
//! `{ "data": { "<id>": { ...record... }, ... } }`. It is fetched once per page
//! session; a failed load degrades to an empty catalog.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, window};

use crate::error::{GalleryError, Result};

pub mod genre;
pub mod pager;
pub mod selection;

pub use genre::{GenreFilter, GenreKey, canonicalize_genre, filter, genre_taxonomy};
pub use pager::{DEFAULT_MAX_VISIBLE, PageItem, Pager, page_window, paginate, total_pages};
pub use selection::FilterState;

/// One playable game. Immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_description: String,
    /// Play target passed to the player page.
    pub url: String,
    #[serde(default, rename = "banner_medium", alias = "bannerUrl")]
    pub banner_url: String,
    /// Comma-separated raw genre names.
    #[serde(default)]
    pub genres: String,
}

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    data: serde_json::Map<String, serde_json::Value>,
}

/// Parse a catalog document. Records that do not match the record shape are
/// skipped with a warning; only a malformed document is an error.
pub fn parse_catalog(text: &str) -> Result<Vec<GameRecord>> {
    let doc: CatalogDocument = serde_json::from_str(text)?;
    let mut records = Vec::with_capacity(doc.data.len());
    for (id, value) in doc.data {
        match serde_json::from_value::<GameRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("skipping catalog entry {id}: {e}"),
        }
    }
    Ok(records)
}

/// Fetch and parse the catalog at `url`.
pub async fn fetch_catalog(url: &str) -> Result<Vec<GameRecord>> {
    let win = window().ok_or(GalleryError::NoGlobal("window"))?;
    let resp: Response = JsFuture::from(win.fetch_with_str(url)).await?.dyn_into()?;
    if !resp.ok() {
        return Err(GalleryError::HttpStatus(resp.status()));
    }
    let body = JsFuture::from(resp.text()?).await?;
    let text = body
        .as_string()
        .ok_or_else(|| GalleryError::Js("catalog body is not text".into()))?;
    parse_catalog(&text)
}

/// `fetch_catalog` with the outcome logged. An empty but well-formed catalog
/// is `Ok`, so callers can tell it apart from a failed load.
pub async fn try_load_catalog(url: &str) -> Result<Vec<GameRecord>> {
    match fetch_catalog(url).await {
        Ok(records) => {
            log::info!("catalog loaded: {} games", records.len());
            Ok(records)
        }
        Err(e) => {
            log::error!("error fetching games from {url}: {e}");
            Err(e)
        }
    }
}

/// Load the catalog, logging any failure and yielding an empty list instead.
pub async fn load_catalog(url: &str) -> Vec<GameRecord> {
    try_load_catalog(url).await.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_keeps_document_order() {
        let text = r#"{"data":{
            "z9":{"title":"Zed","short_description":"z","url":"https://g/z","banner_medium":"z.png","genres":"Action"},
            "a1":{"title":"Alpha","url":"https://g/a","genres":"Puzzle, Kids"}
        }}"#;
        let records = parse_catalog(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Zed");
        assert_eq!(records[0].banner_url, "z.png");
        assert_eq!(records[1].short_description, "");
    }

    #[test]
    fn test_parse_catalog_skips_bad_records() {
        let text = r#"{"data":{"1":{"title":"no url"},"2":{"url":"u","title":"ok"},"3":42}}"#;
        let records = parse_catalog(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "ok");
    }

    #[test]
    fn test_parse_catalog_missing_data_is_empty() {
        assert!(parse_catalog("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_catalog_malformed_document_errors() {
        assert!(matches!(parse_catalog("{not json"), Err(GalleryError::Json(_))));
    }
}
