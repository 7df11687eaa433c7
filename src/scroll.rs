//! Ping-pong text scrolling.
//!
//! A title wider than its viewport slides one character per animation
//! step until its tail is visible, then slides back, forever.  The math
//! is a pure function so the render scheduler decides *when* to step it.

/// Direction the window is currently moving along the text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards the end of the text (+1).
    #[default]
    Forward,
    /// Back towards the start (-1).
    Backward,
}

/// Advance a scroll window by one step.
///
/// Returns the new `(offset, direction)`.  Content that fits the viewport
/// pins the offset at 0 and leaves the direction untouched.
pub fn step(
    offset: usize,
    direction: Direction,
    content_len: usize,
    viewport_len: usize,
) -> (usize, Direction) {
    let max_offset = content_len.saturating_sub(viewport_len);
    if max_offset == 0 {
        return (0, direction);
    }

    let next = match direction {
        Direction::Forward => offset.saturating_add(1),
        Direction::Backward => offset.saturating_sub(1),
    };

    if next >= max_offset {
        (max_offset, Direction::Backward)
    } else if next == 0 {
        (0, Direction::Forward)
    } else {
        (next, direction)
    }
}

/// Scroll position of one text item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    pub offset: usize,
    pub direction: Direction,
}

impl ScrollState {
    /// Start of text, moving forward.
    pub const fn new() -> Self {
        Self {
            offset: 0,
            direction: Direction::Forward,
        }
    }

    /// Step this window over `text`.  Returns `true` if the offset moved.
    pub fn advance(&mut self, text: &str, viewport_len: usize) -> bool {
        let before = self.offset;
        let (offset, direction) = step(
            self.offset,
            self.direction,
            text.chars().count(),
            viewport_len,
        );
        self.offset = offset;
        self.direction = direction;
        offset != before
    }

    /// The part of `text` currently inside the window.
    pub fn window<'a>(&self, text: &'a str, viewport_len: usize) -> &'a str {
        char_window(text, self.offset, viewport_len)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Slice `len` characters of `text` starting at character `start`.
///
/// Out-of-range starts yield an empty slice; never splits a UTF-8 char.
pub fn char_window(text: &str, start: usize, len: usize) -> &str {
    let mut indices = text.char_indices().map(|(i, _)| i).chain(Some(text.len()));
    let Some(begin) = indices.by_ref().nth(start) else {
        return "";
    };
    let end = if len == 0 {
        begin
    } else {
        indices.nth(len - 1).unwrap_or(text.len())
    };
    &text[begin..end]
}
