//! Pagination window computation.

/// One slot in the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Pages shown without any ellipsis.
const FULL_WINDOW: u32 = 7;

/// Compute the page numbers to show for `current` out of `total_pages`.
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if total_pages <= FULL_WINDOW {
        return (1..=total_pages).map(Page).collect();
    }

    let mut items = Vec::with_capacity(9);
    if current <= 4 {
        items.extend((1..=5).map(Page));
        items.push(Ellipsis);
        items.push(Page(total_pages));
    } else if current >= total_pages - 3 {
        items.push(Page(1));
        items.push(Ellipsis);
        items.extend((total_pages - 4..=total_pages).map(Page));
    } else {
        items.push(Page(1));
        items.push(Ellipsis);
        items.extend((current - 1..=current + 1).map(Page));
        items.push(Ellipsis);
        items.push(Page(total_pages));
    }
    items
}
