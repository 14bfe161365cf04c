// Integration tests for the genre alias table invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::{HashMap, HashSet};

use arcade_gallery::GENRE_ALIASES;
use arcade_gallery::catalog::canonicalize_genre;

#[test]
fn alias_keys_are_unique_and_lowercase() {
    let mut seen = HashSet::new();
    for (raw, canonical) in GENRE_ALIASES {
        assert!(seen.insert(*raw), "duplicate alias '{}' in GENRE_ALIASES", raw);
        assert_eq!(raw.trim(), *raw, "alias '{}' has surrounding whitespace", raw);
        assert_eq!(raw.to_lowercase(), *raw, "alias '{}' is not lowercase", raw);
        assert!(!canonical.trim().is_empty(), "empty canonical name for '{}'", raw);
    }
}

#[test]
fn canonical_names_are_fixed_points() {
    let map: HashMap<&str, &str> = GENRE_ALIASES.iter().copied().collect();
    for (_raw, canonical) in GENRE_ALIASES {
        // A canonical name may itself be an alias key only if it maps to itself.
        if let Some(target) = map.get(canonical.to_lowercase().as_str()) {
            assert_eq!(target, canonical, "canonical '{}' is re-aliased to '{}'", canonical, target);
        }
    }
}

#[test]
fn canonicalize_is_idempotent_over_table() {
    for (raw, canonical) in GENRE_ALIASES {
        let once = canonicalize_genre(raw);
        assert_eq!(once.as_str(), *canonical);
        assert_eq!(canonicalize_genre(once.as_str()), once, "not idempotent for '{}'", raw);
    }
}

#[test]
fn documented_folds_are_present() {
    for raw in ["Abenteuer", "abenteuer"] {
        assert_eq!(canonicalize_genre(raw).as_str(), "Adventure Quest");
    }
    for raw in ["Kids", "Big Kids", "Young Kids"] {
        assert_eq!(canonicalize_genre(raw).as_str(), "Kids");
    }
}
