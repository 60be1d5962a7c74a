/// Number of pages needed for `total_count` items; 0 when there are none.
pub(crate) fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Bounds of `page` within `len` items. Out-of-range pages are empty, never an error.
pub(crate) fn page_bounds(len: usize, page: usize, page_size: usize) -> (usize, usize) {
    let start = page.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    (start, end)
}

/// Up to `max_visible` consecutive page indices around `current`, kept inside
/// `[0, total_pages)`. Empty when there are no pages.
///
/// With 10 pages, current page 0 and a window of 5 this is `[0, 1, 2, 3, 4]`;
/// on page 9 it is `[5, 6, 7, 8, 9]`.
pub fn page_numbers(current: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    if total_pages == 0 || max_visible == 0 {
        return Vec::new();
    }

    let last = total_pages - 1;
    let mut start = current.saturating_sub(max_visible / 2);
    let end = start.saturating_add(max_visible - 1).min(last);

    if start > end || end - start < max_visible - 1 {
        start = (end + 1).saturating_sub(max_visible);
    }

    (start..=end).collect()
}
