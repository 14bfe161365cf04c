//! Filter state derived from the page URL.
//!
//! The selection is never cached: every render recomputes it from the query
//! string, so reload and back/forward navigation always agree with the view.

use super::genre::GenreFilter;

pub const CATEGORY_PARAM: &str = "cat";
pub const PAGE_PARAM: &str = "page";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    pub genre: GenreFilter,
    /// 1-based.
    pub page_index: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self { genre: GenreFilter::All, page_index: 1 }
    }
}

impl FilterState {
    /// Build from already-decoded `cat` / `page` query values. A missing or
    /// unparsable page means page 1.
    pub fn from_query(cat: Option<&str>, page: Option<&str>) -> Self {
        let page_index = page
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        Self { genre: GenreFilter::from_param(cat), page_index }
    }

    /// Selecting a genre always starts from its first page.
    pub fn with_genre(&self, genre: GenreFilter) -> Self {
        Self { genre, page_index: 1 }
    }

    /// Move to `page` if it exists for `total_pages`; `None` leaves the caller's
    /// state as it was.
    pub fn with_page(&self, page: usize, total_pages: usize) -> Option<Self> {
        if page < 1 || page > total_pages {
            return None;
        }
        Some(Self { genre: self.genre.clone(), page_index: page })
    }

    /// Page to show for a list with `total_pages`; a stale page from the URL
    /// falls back to 1.
    pub fn effective_page(&self, total_pages: usize) -> usize {
        if self.page_index <= total_pages { self.page_index } else { 1 }
    }

    /// Query parameters to write back, in order. Defaults are omitted so the
    /// canonical "everything, first page" URL has no query at all.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(cat) = self.genre.as_param() {
            pairs.push((CATEGORY_PARAM, cat.to_string()));
        }
        if self.page_index > 1 {
            pairs.push((PAGE_PARAM, self.page_index.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_defaults() {
        assert_eq!(FilterState::from_query(None, None), FilterState::default());
        assert_eq!(FilterState::from_query(None, Some("zero")).page_index, 1);
        assert_eq!(FilterState::from_query(None, Some("0")).page_index, 1);
    }

    #[test]
    fn test_from_query_canonicalizes_category() {
        let s = FilterState::from_query(Some("Abenteuer"), Some("3"));
        assert_eq!(s.genre.as_param(), Some("Adventure Quest"));
        assert_eq!(s.page_index, 3);
    }

    #[test]
    fn test_with_genre_resets_page() {
        let s = FilterState::from_query(Some("Puzzle"), Some("4"));
        let next = s.with_genre(GenreFilter::All);
        assert_eq!(next.page_index, 1);
        assert!(next.query_pairs().is_empty());
    }

    #[test]
    fn test_with_page_rejects_out_of_range() {
        let s = FilterState::default();
        assert!(s.with_page(0, 5).is_none());
        assert!(s.with_page(6, 5).is_none());
        assert_eq!(s.with_page(5, 5).map(|s| s.page_index), Some(5));
    }

    #[test]
    fn test_effective_page_falls_back_for_stale_url() {
        let s = FilterState::from_query(Some("Puzzle"), Some("9"));
        assert_eq!(s.effective_page(3), 1);
        assert_eq!(s.effective_page(12), 9);
    }

    #[test]
    fn test_query_pairs_roundtrip_fields() {
        let s = FilterState::from_query(Some("kids"), Some("2"));
        assert_eq!(
            s.query_pairs(),
            vec![("cat", "Kids".to_string()), ("page", "2".to_string())]
        );
    }
}
