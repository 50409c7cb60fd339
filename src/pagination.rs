//! Page math for the note list
//!
//! Pure functions over the titles returned by the note store. The store
//! gives no ordering guarantee, so titles are displayed in lexicographic
//! order and numbered continuously across pages.

use crate::runtime::NoteCollection;

/// Number of titles shown on one page
///
/// The scroller is configured with a width and a height; when the height is
/// above one the visible capacity is their product.
pub fn capacity(width: usize, height: usize) -> usize {
    let capacity = if height > 1 { width * height } else { width };
    capacity.max(1)
}

/// Deterministic display order for a note collection
pub fn display_order(notes: &NoteCollection) -> Vec<String> {
    let mut titles: Vec<String> = notes.keys().cloned().collect();
    titles.sort();
    titles
}

/// One visible page of the note list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page number after correction; persist this back into the session
    pub page_number: usize,
    /// `(global_index, title)` pairs, indices starting at 1
    pub items: Vec<(usize, String)>,
    pub total_pages: usize,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Total number of pages for `len` titles, at least one
pub fn total_pages(len: usize, capacity: usize) -> usize {
    len.div_ceil(capacity.max(1)).max(1)
}

/// Slice `titles` to the page at `page_number`
///
/// A page number that rolled past the end of the list (the last item on the
/// final page was just deleted) is moved back onto the last page. An empty
/// list yields an empty page 0.
pub fn render_page(page_number: usize, titles: &[String], capacity: usize) -> Page {
    let capacity = capacity.max(1);
    let len = titles.len();
    let total_pages = total_pages(len, capacity);

    if len == 0 {
        return Page {
            page_number: 0,
            items: Vec::new(),
            total_pages,
        };
    }

    // Out-of-range or overflowing page numbers land on the last page
    let (page_number, start) = match page_number.checked_mul(capacity) {
        Some(start) if start < len => (page_number, start),
        _ => {
            let last = total_pages - 1;
            (last, last * capacity)
        }
    };
    let end = start.saturating_add(capacity).min(len);

    let items = titles[start..end]
        .iter()
        .enumerate()
        .map(|(offset, title)| (start + offset + 1, title.clone()))
        .collect();

    Page {
        page_number,
        items,
        total_pages,
    }
}
