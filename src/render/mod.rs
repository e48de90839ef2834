//! Incremental Renderer.
//!
//! The list is revealed in bounded slices: [`advance`] takes the next page of
//! the filtered view from the display cursor and reports whether anything is
//! left. Output goes through the [`Presenter`] seam.

pub mod presenter;
pub mod terminal;

pub use presenter::{FilterControl, Presenter, TooltipAnchor};
pub use terminal::TerminalPresenter;

/// The outcome of one [`advance`] call
#[derive(Debug, PartialEq, Eq)]
pub struct Reveal<'a, T> {
    /// Items to append to the list
    pub slice: &'a [T],
    /// Cursor after this reveal
    pub displayed: usize,
    /// Whether the load-more affordance should stay visible
    pub has_more: bool,
}

/// Take the next `page_size` items of `filtered` starting at `displayed`.
///
/// An empty slice leaves the cursor where it was and reports nothing more.
/// Otherwise the cursor moves past the slice; it never exceeds the filtered
/// length, so a short final page is followed by an empty one.
pub fn advance<T>(filtered: &[T], displayed: usize, page_size: usize) -> Reveal<'_, T> {
    let start = displayed.min(filtered.len());
    let end = start.saturating_add(page_size).min(filtered.len());
    let slice = &filtered[start..end];

    if slice.is_empty() {
        return Reveal {
            slice,
            displayed,
            has_more: false,
        };
    }

    Reveal {
        slice,
        displayed: end,
        has_more: end < filtered.len(),
    }
}
