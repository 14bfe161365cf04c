//! Gallery page controller.
//!
//! The catalog is loaded once and kept for the session; everything else (the
//! selected genre and page) is re-read from `location.search` on every render,
//! so there is no second copy of the selection to drift out of sync. Clicks
//! push a new URL and re-render; `popstate` re-renders for back/forward.

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, UrlSearchParams, window};

use crate::catalog::{
    self, FilterState, GameRecord, GenreFilter, filter, genre_taxonomy, page_window, paginate,
    selection::{CATEGORY_PARAM, PAGE_PARAM},
    total_pages,
};
use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::toast::{ToastKind, notify};

pub mod markup;

pub const GENRE_LIST_SELECTOR: &str = ".sorter";
pub const GAMES_LIST_ID: &str = "games-list";
pub const PAGINATION_ID: &str = "pagination";

struct Gallery {
    config: GalleryConfig,
    catalog: Vec<GameRecord>,
}

thread_local! {
    static GALLERY: RefCell<Option<Gallery>> = const { RefCell::new(None) };
    // Set before the fetch is awaited, so a second start never fetches again.
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

fn document() -> Result<Document> {
    window()
        .and_then(|w| w.document())
        .ok_or(GalleryError::NoGlobal("document"))
}

/// Selection encoded in the current URL.
pub fn current_filter_state() -> Result<FilterState> {
    let search = window()
        .ok_or(GalleryError::NoGlobal("window"))?
        .location()
        .search()?;
    let params = UrlSearchParams::new_with_str(&search)?;
    Ok(FilterState::from_query(
        params.get(CATEGORY_PARAM).as_deref(),
        params.get(PAGE_PARAM).as_deref(),
    ))
}

/// Push `state` as the new URL (no reload).
pub fn push_state(state: &FilterState) -> Result<()> {
    let win = window().ok_or(GalleryError::NoGlobal("window"))?;
    let params = UrlSearchParams::new()?;
    for (key, value) in state.query_pairs() {
        params.append(key, &value);
    }
    let query: String = params.to_string().into();
    let path = win.location().pathname()?;
    let url = if query.is_empty() { path } else { format!("{path}?{query}") };
    win.history()?.push_state_with_url(&JsValue::NULL, "", Some(&url))?;
    Ok(())
}

fn play_href(config: &GalleryConfig, game: &GameRecord) -> String {
    let encoded: String = js_sys::encode_uri_component(&game.url).into();
    format!("{}?gameUrl={encoded}", config.play_page)
}

fn set_html(el: Option<Element>, what: &str, html: &str) {
    match el {
        Some(el) => el.set_inner_html(html),
        None => log::warn!("gallery target `{what}` not found"),
    }
}

impl Gallery {
    fn render(&self) -> Result<()> {
        let doc = document()?;
        let state = current_filter_state()?;
        let taxonomy = genre_taxonomy(&self.catalog);
        let filtered = filter(&self.catalog, &state.genre);
        let pages = total_pages(filtered.len(), self.config.page_size);
        let page = state.effective_page(pages);
        let visible = paginate(&filtered, self.config.page_size, page).unwrap_or(&[]);

        set_html(
            doc.query_selector(GENRE_LIST_SELECTOR)?,
            GENRE_LIST_SELECTOR,
            &markup::genre_list(&taxonomy, &state.genre),
        );
        set_html(
            doc.get_element_by_id(GAMES_LIST_ID),
            GAMES_LIST_ID,
            &markup::games_grid(visible.iter().copied(), |g| play_href(&self.config, g)),
        );
        set_html(
            doc.get_element_by_id(PAGINATION_ID),
            PAGINATION_ID,
            &markup::pagination(&page_window(pages, page, self.config.max_visible_pages)),
        );
        log::debug!(
            "rendered {} ({} games, page {page}/{pages})",
            state.genre.label(),
            filtered.len()
        );
        Ok(())
    }

    fn total_pages_for(&self, genre: &GenreFilter) -> usize {
        total_pages(filter(&self.catalog, genre).len(), self.config.page_size)
    }

    /// Handle a click inside the genre list or the pagination bar.
    fn on_click(&self, evt: &Event) -> Result<()> {
        let Some(target) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return Ok(());
        };
        let state = current_filter_state()?;
        if let Some(link) = target.closest(&format!("[{}]", markup::GENRE_ATTR))? {
            evt.prevent_default();
            let genre = GenreFilter::from_param(link.get_attribute(markup::GENRE_ATTR).as_deref());
            push_state(&state.with_genre(genre))?;
            return self.render();
        }
        if let Some(link) = target.closest(&format!("[{}]", markup::PAGE_ATTR))? {
            evt.prevent_default();
            let requested = link
                .get_attribute(markup::PAGE_ATTR)
                .and_then(|p| p.parse::<usize>().ok());
            let pages = self.total_pages_for(&state.genre);
            // Out-of-range pages are ignored without touching the URL.
            if let Some(next) = requested.and_then(|p| state.with_page(p, pages)) {
                push_state(&next)?;
                return self.render();
            }
        }
        Ok(())
    }
}

fn with_gallery(f: impl FnOnce(&Gallery) -> Result<()>) {
    GALLERY.with(|cell| {
        if let Some(gallery) = cell.borrow().as_ref() {
            if let Err(e) = f(gallery) {
                log::error!("gallery: {e}");
            }
        }
    });
}

fn install_listeners() -> Result<()> {
    let win = window().ok_or(GalleryError::NoGlobal("window"))?;
    let doc = document()?;

    let on_pop = Closure::wrap(Box::new(move |_evt: Event| {
        with_gallery(Gallery::render);
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref())?;
    on_pop.forget();

    let on_click = Closure::wrap(Box::new(move |evt: Event| {
        with_gallery(|g| g.on_click(&evt));
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

/// Load the catalog (first call only), wire listeners and render.
pub async fn start(config: GalleryConfig) -> Result<()> {
    if STARTED.with(|s| s.replace(true)) {
        with_gallery(Gallery::render);
        return Ok(());
    }

    let records = match catalog::try_load_catalog(&config.catalog_url).await {
        Ok(records) => records,
        Err(_) => {
            notify("Games could not be loaded right now. Please try again later.", ToastKind::Warning);
            Vec::new()
        }
    };
    GALLERY.with(|cell| {
        *cell.borrow_mut() = Some(Gallery { config, catalog: records });
    });
    install_listeners()?;
    with_gallery(Gallery::render);
    Ok(())
}
