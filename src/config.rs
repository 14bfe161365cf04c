//! Page-level configuration passed from JS as an optional JSON object.

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_MAX_VISIBLE;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryConfig {
    pub catalog_url: String,
    pub page_size: usize,
    pub max_visible_pages: usize,
    pub login_url: String,
    pub games_url: String,
    /// Player page; cards link to `<play_page>?gameUrl=<url>`.
    pub play_page: String,
    pub redirect_delay_ms: i32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            catalog_url: "/assets/js/json/marketjs.json".into(),
            page_size: 8,
            max_visible_pages: DEFAULT_MAX_VISIBLE,
            login_url: "./auth.html".into(),
            games_url: "./games.html".into(),
            play_page: "game_play.html".into(),
            redirect_delay_ms: 3000,
        }
    }
}

impl GalleryConfig {
    /// Parse page-supplied JSON; absent or malformed input yields the defaults
    /// (malformed is logged). A zero page size is replaced by the default and
    /// the page bar always shows at least one page.
    pub fn from_json(json: Option<&str>) -> Self {
        let mut cfg = match json.map(str::trim).filter(|t| !t.is_empty()) {
            None => Self::default(),
            Some(text) => serde_json::from_str(text).unwrap_or_else(|e| {
                log::warn!("invalid gallery config ({e}); using defaults");
                Self::default()
            }),
        };
        if cfg.page_size == 0 {
            log::warn!("page size 0 is not usable; falling back to {}", Self::default().page_size);
            cfg.page_size = Self::default().page_size;
        }
        if cfg.max_visible_pages == 0 {
            log::warn!("maxVisiblePages 0 is not usable; showing at least one page");
            cfg.max_visible_pages = 1;
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site() {
        let cfg = GalleryConfig::from_json(None);
        assert_eq!(cfg.page_size, 8);
        assert_eq!(cfg.max_visible_pages, 15);
        assert_eq!(cfg.redirect_delay_ms, 3000);
    }

    #[test]
    fn test_partial_override() {
        let cfg = GalleryConfig::from_json(Some(r#"{"pageSize": 12, "catalogUrl": "/c.json"}"#));
        assert_eq!(cfg.page_size, 12);
        assert_eq!(cfg.catalog_url, "/c.json");
        assert_eq!(cfg.login_url, "./auth.html");
    }

    #[test]
    fn test_bad_input_falls_back() {
        assert_eq!(GalleryConfig::from_json(Some("nope")), GalleryConfig::default());
        assert_eq!(GalleryConfig::from_json(Some(r#"{"pageSize":0}"#)).page_size, 8);
    }

    #[test]
    fn test_zero_max_visible_is_clamped() {
        let cfg = GalleryConfig::from_json(Some(r#"{"maxVisiblePages":0}"#));
        assert_eq!(cfg.max_visible_pages, 1);
    }
}
