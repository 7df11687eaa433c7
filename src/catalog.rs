//! Track catalogue on the SD card.
//!
//! Tracks are numbered 1..=TOTAL_TRACKS on the remote, the bus and the
//! DFPlayer; titles are stored zero-indexed.  [`TrackNumber`] is the only
//! place that converts between the two.

use crate::config::TOTAL_TRACKS;
use crate::error::Error;

/// Titles shown on screen, in SD card order.
pub const TITLES: [&str; TOTAL_TRACKS] = [
    "Glorious - Macklemore",
    "LOST IN THE ECHO - Linkin Park",
    "Am I Dreaming",
    "Tokyo Ghoul OST",
    "Feather - Nujabes",
    "Holiday - Green Day",
    "Number One Bankai",
    "Don't Even Try It - Funky DL",
];

/// A valid 1-based track number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackNumber(u8);

impl TrackNumber {
    pub const FIRST: Self = Self(1);
    pub const LAST: Self = Self(TOTAL_TRACKS as u8);

    /// `None` unless `n` is in `1..=TOTAL_TRACKS`.
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n as usize <= TOTAL_TRACKS {
            Some(Self(n))
        } else {
            None
        }
    }

    /// Parse a decimal track number from a bus argument.
    pub fn parse(arg: &str) -> Result<Self, Error> {
        arg.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or(Error::InvalidTrack)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot into [`TITLES`] and per-track arrays.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < TOTAL_TRACKS {
            Some(Self(index as u8 + 1))
        } else {
            None
        }
    }

    /// Following track, wrapping from the last back to the first.
    pub const fn next(self) -> Self {
        if self.0 as usize >= TOTAL_TRACKS {
            Self::FIRST
        } else {
            Self(self.0 + 1)
        }
    }

    /// Preceding track, wrapping from the first to the last.
    pub const fn prev(self) -> Self {
        if self.0 <= 1 {
            Self::LAST
        } else {
            Self(self.0 - 1)
        }
    }

    pub fn title(self) -> &'static str {
        TITLES[self.index()]
    }

    /// All tracks in catalogue order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..TOTAL_TRACKS).filter_map(Self::from_index)
    }
}

impl Default for TrackNumber {
    fn default() -> Self {
        Self::FIRST
    }
}
