//! Audible feedback for card scans.
//!
//! Short fixed tone patterns on a piezo buzzer.  Playing one holds the
//! control loop for its whole (bounded) length, which is fine: nothing
//! else needs attention while a card is being checked.

#[cfg(feature = "embedded")]
pub mod buzzer;

use crate::config::{BEEP_DURATION_MS, FAIL_FREQ_HZ, SUCCESS_FREQ_HZ};

/// Which pattern to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Chime {
    /// Two quick high beeps.
    Success,
    /// One long low tone.
    Failure,
}

/// One segment of a pattern; `freq_hz == 0` is silence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneStep {
    pub freq_hz: u32,
    pub duration_ms: u32,
}

const SUCCESS: [ToneStep; 3] = [
    ToneStep { freq_hz: SUCCESS_FREQ_HZ, duration_ms: BEEP_DURATION_MS },
    ToneStep { freq_hz: 0, duration_ms: 50 },
    ToneStep { freq_hz: SUCCESS_FREQ_HZ, duration_ms: BEEP_DURATION_MS },
];

const FAILURE: [ToneStep; 2] = [
    ToneStep { freq_hz: FAIL_FREQ_HZ, duration_ms: BEEP_DURATION_MS * 3 },
    ToneStep { freq_hz: 0, duration_ms: 500 - BEEP_DURATION_MS * 3 },
];

impl Chime {
    pub fn pattern(self) -> &'static [ToneStep] {
        match self {
            Chime::Success => &SUCCESS,
            Chime::Failure => &FAILURE,
        }
    }

    /// Total time the loop is held while this chime plays.
    pub fn duration_ms(self) -> u32 {
        self.pattern().iter().map(|s| s.duration_ms).sum()
    }
}

/// Something that can play a chime to completion.
pub trait ToneOutput {
    fn play(&mut self, chime: Chime);
}
