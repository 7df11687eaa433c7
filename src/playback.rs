//! Playback state: current track, volume, playing flag.

use crate::catalog::TrackNumber;
use crate::config::{VOL_DEFAULT, VOL_MAX};
use crate::error::Error;

/// What the audio module is (supposed to be) doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackState {
    pub track: TrackNumber,
    /// Always within `0..=VOL_MAX`.
    volume: u8,
    pub playing: bool,
}

impl PlaybackState {
    pub const fn new() -> Self {
        Self {
            track: TrackNumber::FIRST,
            volume: VOL_DEFAULT,
            playing: false,
        }
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Clamp and store a requested volume; returns the stored value.
    pub fn set_volume(&mut self, requested: i32) -> u8 {
        self.volume = clamp_volume(requested);
        self.volume
    }

    /// Back to track 1, stopped.  Volume survives a logout.
    pub fn reset(&mut self) {
        self.track = TrackNumber::FIRST;
        self.playing = false;
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp (never wrap) a requested volume into `0..=VOL_MAX`.
pub fn clamp_volume(requested: i32) -> u8 {
    requested.clamp(0, VOL_MAX as i32) as u8
}

/// Parse a signed decimal volume from a bus argument.
pub fn parse_volume(arg: &str) -> Result<i32, Error> {
    arg.trim().parse::<i32>().map_err(|_| Error::InvalidVolume)
}
