//! Recommendation payloads from the command bus.
//!
//! Wire form is one string of `|`-separated lines: a header followed by
//! up to `MAX_REC_LINES - 1` items, e.g. `"Top Picks|Song A|Song B"`.
//! Malformed or oversized payloads degrade to whatever parses.

use crate::config::{MAX_REC_LINES, MAX_REC_LINE_LEN};
use heapless::{String, Vec};

/// Scrollable items below the header.
pub const MAX_REC_ITEMS: usize = MAX_REC_LINES - 1;

const DELIMITER: char = '|';

pub type RecLine = String<MAX_REC_LINE_LEN>;

/// Parsed recommendation screen content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Recommendations {
    pub header: RecLine,
    pub items: Vec<RecLine, MAX_REC_ITEMS>,
}

impl Recommendations {
    /// Split and trim `payload`.
    ///
    /// Empty lines in the middle are kept (they show as blank rows); a
    /// trailing empty line is dropped.  Lines beyond the limit and
    /// characters beyond `MAX_REC_LINE_LEN` are cut silently.
    pub fn parse(payload: &str) -> Self {
        let mut recs = Self::default();
        let mut segments = payload.split(DELIMITER).peekable();
        let mut index = 0;

        while let Some(segment) = segments.next() {
            if index >= MAX_REC_LINES {
                break;
            }
            let line = segment.trim();
            if line.is_empty() && segments.peek().is_none() {
                break;
            }

            if index == 0 {
                recs.header = truncated(line);
            } else {
                let _ = recs.items.push(truncated(line));
            }
            index += 1;
        }
        recs
    }
}

fn truncated(line: &str) -> RecLine {
    let mut out = RecLine::new();
    for c in line.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
