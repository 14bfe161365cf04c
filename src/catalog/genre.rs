//! Genre canonicalization and taxonomy.
//!
//! Raw catalog genres arrive as free text from several feed providers, so the
//! same genre shows up in different casings and languages. Every raw fragment
//! is folded through one immutable alias table before it is compared or shown.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::OnceLock;

use super::GameRecord;

// -----------------------------------------------------------------------------
// Alias table: lowercase raw spelling -> canonical display name.
// Canonical names must never be keys that map elsewhere (keeps folding idempotent).
// -----------------------------------------------------------------------------

pub const GENRE_ALIASES: &[(&str, &str)] = &[
    ("abenteuer", "Adventure Quest"), ("adventure", "Adventure Quest"), ("aventure", "Adventure Quest"),
    ("aventura", "Adventure Quest"), ("adventures", "Adventure Quest"),
    ("kids", "Kids"), ("big kids", "Kids"), ("young kids", "Kids"), ("kinder", "Kids"),
    ("children", "Kids"),
    ("action", "Action"), ("aktion", "Action"), ("acción", "Action"),
    ("puzzle", "Puzzle"), ("puzzles", "Puzzle"), ("rätsel", "Puzzle"), ("logic", "Puzzle"),
    ("arcade", "Arcade"), ("arcades", "Arcade"),
    ("sport", "Sports"), ("sports", "Sports"),
    ("racing", "Racing"), ("rennen", "Racing"), ("car", "Racing"), ("cars", "Racing"),
    ("strategy", "Strategy"), ("strategie", "Strategy"),
    ("casual", "Casual"), ("hypercasual", "Casual"), ("hyper casual", "Casual"),
    ("shooter", "Shooter"), ("shooting", "Shooter"),
    ("girls", "Girls"), ("mädchen", "Girls"),
    ("match 3", "Match 3"), ("match-3", "Match 3"), ("match3", "Match 3"),
];

fn alias_map() -> &'static HashMap<&'static str, &'static str> {
    static ALIASES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    ALIASES.get_or_init(|| GENRE_ALIASES.iter().copied().collect())
}

/// Canonical genre name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenreKey(String);

impl GenreKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GenreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim and fold a raw genre through the alias table; unknown genres keep
/// their trimmed spelling.
pub fn canonicalize_genre(raw: &str) -> GenreKey {
    let trimmed = raw.trim();
    match alias_map().get(trimmed.to_lowercase().as_str()) {
        Some(canonical) => GenreKey((*canonical).to_string()),
        None => GenreKey(trimmed.to_string()),
    }
}

/// Canonical genres of one record, skipping empty fragments (`"Action, ,"`).
pub fn record_genres(record: &GameRecord) -> impl Iterator<Item = GenreKey> + '_ {
    record
        .genres
        .split(',')
        .filter(|g| !g.trim().is_empty())
        .map(canonicalize_genre)
}

/// Genre selection: everything, or one canonical genre.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenreFilter {
    All,
    Genre(GenreKey),
}

impl GenreFilter {
    pub const ALL_KEY: &'static str = "all";

    /// Parse a selection as it appears in the URL. Absent, blank and `"all"`
    /// select everything; anything else is canonicalized.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") => GenreFilter::All,
            Some(p) if p.eq_ignore_ascii_case(Self::ALL_KEY) => GenreFilter::All,
            Some(p) => GenreFilter::Genre(canonicalize_genre(p)),
        }
    }

    /// Value written back into the `cat` query parameter; `None` for all.
    pub fn as_param(&self) -> Option<&str> {
        match self {
            GenreFilter::All => None,
            GenreFilter::Genre(key) => Some(key.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GenreFilter::All => "All",
            GenreFilter::Genre(key) => key.as_str(),
        }
    }

    pub fn matches(&self, record: &GameRecord) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Genre(key) => record_genres(record).any(|g| &g == key),
        }
    }
}

/// All canonical genres present in the catalog, sorted, with `All` first.
pub fn genre_taxonomy(catalog: &[GameRecord]) -> Vec<GenreFilter> {
    let genres: BTreeSet<GenreKey> = catalog.iter().flat_map(record_genres).collect();
    std::iter::once(GenreFilter::All)
        .chain(genres.into_iter().map(GenreFilter::Genre))
        .collect()
}

/// Records matching the selection, in catalog order.
pub fn filter<'a>(catalog: &'a [GameRecord], genre: &GenreFilter) -> Vec<&'a GameRecord> {
    catalog.iter().filter(|r| genre.matches(r)).collect()
}
