//! Fixed-size pagination and the truncated page-number window.

/// Number of pages needed for `len` items; zero for an empty list.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Slice for 1-based `page_index`. Out-of-range pages are rejected (`None`)
/// instead of clamped.
pub fn paginate<T>(filtered: &[T], page_size: usize, page_index: usize) -> Option<&[T]> {
    let pages = total_pages(filtered.len(), page_size);
    if page_index < 1 || page_index > pages {
        return None;
    }
    let start = (page_index - 1) * page_size;
    let end = (start + page_size).min(filtered.len());
    Some(&filtered[start..end])
}

/// Cursor over a filtered list. `goto` refuses out-of-range pages and leaves
/// the current page untouched.
pub struct Pager<'a, T> {
    items: &'a [T],
    page_size: usize,
    current: usize,
}

impl<'a, T> Pager<'a, T> {
    pub fn new(items: &'a [T], page_size: usize) -> Self {
        Self { items, page_size, current: 1 }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.items.len(), self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn goto(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.current = page;
        true
    }

    /// Items on the current page; empty when the list has no pages at all.
    pub fn current_items(&self) -> &'a [T] {
        paginate(self.items, self.page_size, self.current).unwrap_or(&[])
    }
}

/// One control in the pagination bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Prev { target: usize, disabled: bool },
    Page { number: usize, active: bool },
    Ellipsis,
    Next { target: usize, disabled: bool },
}

pub const DEFAULT_MAX_VISIBLE: usize = 15;

/// Page controls for `current_page` of `total_pages`, framed by prev/next.
///
/// Up to `max_visible` pages are listed in full. Beyond that the bar shows
/// page 1, a window of `2 * (max_visible / 2) + 1` pages centered on the
/// current page, and the last page, with an ellipsis wherever pages are skipped.
pub fn page_window(total_pages: usize, current_page: usize, max_visible: usize) -> Vec<PageItem> {
    let mut items = Vec::new();
    items.push(PageItem::Prev {
        target: current_page.saturating_sub(1),
        disabled: current_page <= 1 || total_pages == 0,
    });

    let page = |n: usize| PageItem::Page { number: n, active: n == current_page };

    if total_pages <= max_visible {
        items.extend((1..=total_pages).map(page));
    } else {
        let half = max_visible / 2;
        let start = current_page.saturating_sub(half).max(2);
        let end = (current_page + half).min(total_pages - 1);

        items.push(page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
        items.extend((start..=end).map(page));
        if end + 1 < total_pages {
            items.push(PageItem::Ellipsis);
        }
        if total_pages > 1 {
            items.push(page(total_pages));
        }
    }

    items.push(PageItem::Next {
        target: current_page + 1,
        disabled: current_page >= total_pages,
    });
    items
}
