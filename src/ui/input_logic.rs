//! Page navigation on the track list.

use crate::catalog::TrackNumber;
use crate::config::{TOTAL_TRACKS, TRACKS_PER_PAGE};

/// Number of list pages (last page may be partial).
pub const fn page_count() -> usize {
    TOTAL_TRACKS.div_ceil(TRACKS_PER_PAGE)
}

/// Following page, wrapping from the last back to page 1.
pub fn next_page(page: usize) -> usize {
    if page >= page_count() {
        1
    } else {
        page + 1
    }
}

/// Preceding page, wrapping from page 1 to the last.
pub fn prev_page(page: usize) -> usize {
    if page <= 1 {
        page_count()
    } else {
        page - 1
    }
}

/// Tracks listed on a 1-based page.
pub fn tracks_on_page(page: usize) -> impl Iterator<Item = TrackNumber> {
    let start = page.saturating_sub(1) * TRACKS_PER_PAGE;
    (start..start + TRACKS_PER_PAGE).filter_map(TrackNumber::from_index)
}
