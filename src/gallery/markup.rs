//! HTML builders for the gallery. Pure string functions so they run in native
//! tests; the browser side only assigns the results to `innerHTML`.

use std::fmt::Write;

use crate::catalog::{GameRecord, GenreFilter, PageItem};

pub const GENRE_ATTR: &str = "data-cat";
pub const PAGE_ATTR: &str = "data-page";

/// Escape text for element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Sidebar genre links; the selected genre gets `active`.
pub fn genre_list(taxonomy: &[GenreFilter], selected: &GenreFilter) -> String {
    let mut html = String::new();
    for genre in taxonomy {
        let key = genre.as_param().unwrap_or(GenreFilter::ALL_KEY);
        let active = if genre == selected { " active" } else { "" };
        let _ = write!(
            html,
            "<a href=\"#\" class=\"genre-link\" {GENRE_ATTR}=\"{key}\">\
               <li class=\"list-group-item{active}\"><i class=\"fas fa-tag me-2\"></i>{label}</li>\
             </a>",
            key = escape_html(key),
            label = escape_html(genre.label()),
        );
    }
    html
}

pub fn game_card(game: &GameRecord, play_href: &str) -> String {
    let title = escape_html(&game.title);
    let href = escape_html(play_href);
    format!(
        "<div class=\"col-md-6 col-lg-3 mb-4 mt-0\">\
           <div class=\"new-grid-ltpwrl gallery-grid view view-eighth zoom-img card h-100\">\
             <div class=\"game-image position-relative\">\
               <img class=\"img-responsive zoom-img card-img-top\" src=\"{banner}\" alt=\"{title}\" />\
               <div class=\"play-button\" style=\"position:absolute;top:15px;right:15px;\">\
                 <a href=\"{href}\" class=\"btn btn-play btn-sm\" style=\"padding:0.6rem 1.1rem;\"><i class=\"fas fa-play\"></i></a>\
               </div>\
             </div>\
             <div class=\"mask card-body d-flex flex-column justify-content-end\">\
               <div class=\"flex_holder\">\
                 <h4>{title}</h4>\
                 <p>{desc}</p>\
                 <div class=\"play-button\"><a href=\"{href}\" class=\"button btn btn-primary btn-sm mt-2\">Play Now</a></div>\
               </div>\
             </div>\
           </div>\
         </div>",
        banner = escape_html(&game.banner_url),
        desc = escape_html(&game.short_description),
    )
}

pub fn games_grid<'a>(
    games: impl IntoIterator<Item = &'a GameRecord>,
    play_href: impl Fn(&GameRecord) -> String,
) -> String {
    games
        .into_iter()
        .map(|g| game_card(g, &play_href(g)))
        .collect()
}

/// Bootstrap pagination items for a page window.
pub fn pagination(items: &[PageItem]) -> String {
    let mut html = String::new();
    for item in items {
        let _ = match *item {
            PageItem::Prev { target, disabled } => nav_item(&mut html, target, disabled, "Previous", "&laquo;"),
            PageItem::Next { target, disabled } => nav_item(&mut html, target, disabled, "Next", "&raquo;"),
            PageItem::Page { number, active } => write!(
                html,
                "<li class=\"page-item{}\"><a class=\"page-link\" href=\"#\" {PAGE_ATTR}=\"{number}\">{number}</a></li>",
                if active { " active" } else { "" },
            ),
            PageItem::Ellipsis => {
                write!(html, "<li class=\"page-item disabled\"><span class=\"page-link\">...</span></li>")
            }
        };
    }
    html
}

fn nav_item(html: &mut String, target: usize, disabled: bool, label: &str, glyph: &str) -> std::fmt::Result {
    if disabled {
        write!(
            html,
            "<li class=\"page-item disabled\"><a class=\"page-link\" href=\"#\" aria-label=\"{label}\">{glyph}</a></li>"
        )
    } else {
        write!(
            html,
            "<li class=\"page-item\"><a class=\"page-link\" href=\"#\" aria-label=\"{label}\" {PAGE_ATTR}=\"{target}\">{glyph}</a></li>"
        )
    }
}
