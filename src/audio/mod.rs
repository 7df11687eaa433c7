//! Audio subsystem - DFPlayer Mini MP3 module.
//!
//! The DFPlayer is driven over a 9600 baud UART with fixed 10-byte
//! frames and reports playback through its BUSY pin (low while a track
//! plays, high when idle).
//!
//! ## Components
//!
//! - **dfplayer**: command frame codec (host-testable)
//! - **FinishEdge**: BUSY-line edge detector that turns "track ended"
//!   into exactly one event
//! - **player**: UART driver (embedded only)

pub mod dfplayer;
#[cfg(feature = "embedded")]
pub mod player;

use crate::catalog::TrackNumber;
use crate::error::Error;

/// Logic level of the BUSY line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Playback capabilities the control loop needs from the audio module.
pub trait AudioModule {
    fn play_track(&mut self, track: TrackNumber) -> Result<(), Error>;
    fn stop(&mut self) -> Result<(), Error>;
    fn set_volume(&mut self, volume: u8) -> Result<(), Error>;
    /// Current level of the BUSY line.
    fn busy_level(&mut self) -> Level;
}

/// Detects the low→high BUSY transition that marks the end of a track.
///
/// Tracks the previously observed level so a line held high fires once,
/// not once per poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FinishEdge {
    last: Level,
}

impl FinishEdge {
    pub const fn new() -> Self {
        Self { last: Level::High }
    }

    /// Forget the previous level.  Called whenever playback is (re)started
    /// or toggled, so the module's own BUSY settling is not mistaken for
    /// a finished track.
    pub fn arm(&mut self) {
        self.last = Level::High;
    }

    /// Feed one poll.  `true` exactly on a low→high edge while playing.
    pub fn observe(&mut self, level: Level, playing: bool) -> bool {
        let finished = playing && self.last == Level::Low && level == Level::High;
        self.last = level;
        finished
    }
}

impl Default for FinishEdge {
    fn default() -> Self {
        Self::new()
    }
}
