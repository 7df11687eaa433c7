//! NEC infrared protocol decoder.
//!
//! Fed with the duration of each mark (carrier on, receiver output low)
//! and space between edges:
//!
//! ```text
//! frame:  9 ms mark, 4.5 ms space, 32 × (562 µs mark + 562|1687 µs space), 562 µs stop mark
//! repeat: 9 ms mark, 2.25 ms space, 562 µs stop mark
//! ```
//!
//! Bits are shifted in MSB-first in arrival order, so the value reads as
//! address, !address, command, !command (e.g. `0x00FF_A25D`).

const LEADER_MARK_US: u32 = 9_000;
const LEADER_SPACE_US: u32 = 4_500;
const REPEAT_SPACE_US: u32 = 2_250;
const BIT_MARK_US: u32 = 562;
const ZERO_SPACE_US: u32 = 562;
const ONE_SPACE_US: u32 = 1_687;

const FRAME_BITS: u8 = 32;

/// One level period between two edges on the receiver output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pulse {
    Mark(u32),
    Space(u32),
}

/// Decoder output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NecFrame {
    Data(u32),
    /// Key held down; carries no code.
    Repeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    LeaderSpace,
    BitMark,
    BitSpace,
}

/// Pulse-width state machine.  Anything out of tolerance drops the
/// partial frame silently.
#[derive(Clone, Debug)]
pub struct NecDecoder {
    state: State,
    bits: u32,
    count: u8,
}

/// ±25 % window around a nominal duration.
fn near(actual: u32, nominal: u32) -> bool {
    let slack = nominal / 4;
    actual >= nominal - slack && actual <= nominal + slack
}

impl NecDecoder {
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            bits: 0,
            count: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feed one pulse; returns a frame when one completes.
    pub fn feed(&mut self, pulse: Pulse) -> Option<NecFrame> {
        match (self.state, pulse) {
            (State::Idle, Pulse::Mark(us)) if near(us, LEADER_MARK_US) => {
                self.state = State::LeaderSpace;
                None
            }
            (State::LeaderSpace, Pulse::Space(us)) if near(us, LEADER_SPACE_US) => {
                self.bits = 0;
                self.count = 0;
                self.state = State::BitMark;
                None
            }
            (State::LeaderSpace, Pulse::Space(us)) if near(us, REPEAT_SPACE_US) => {
                self.reset();
                Some(NecFrame::Repeat)
            }
            (State::BitMark, Pulse::Mark(us)) if near(us, BIT_MARK_US) => {
                if self.count == FRAME_BITS {
                    let code = self.bits;
                    self.reset();
                    Some(NecFrame::Data(code))
                } else {
                    self.state = State::BitSpace;
                    None
                }
            }
            (State::BitSpace, Pulse::Space(us)) if near(us, ZERO_SPACE_US) => {
                self.push_bit(0);
                None
            }
            (State::BitSpace, Pulse::Space(us)) if near(us, ONE_SPACE_US) => {
                self.push_bit(1);
                None
            }
            (State::Idle, _) => None,
            // Out of sequence: a fresh leader may still start a frame.
            (_, pulse) => {
                self.reset();
                self.feed(pulse)
            }
        }
    }

    fn push_bit(&mut self, bit: u32) {
        self.bits = (self.bits << 1) | bit;
        self.count += 1;
        self.state = State::BitMark;
    }
}

impl Default for NecDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns edge timestamps into [`Pulse`]s.
///
/// Widths are only as good as the timestamps: the receiver task must
/// stamp each edge as it happens, not when a busy executor gets round
/// to it.
#[derive(Clone, Debug, Default)]
pub struct EdgeClock {
    last_us: Option<u64>,
}

impl EdgeClock {
    pub const fn new() -> Self {
        Self { last_us: None }
    }

    /// Forget the previous edge; the next one only restarts the clock.
    pub fn reset(&mut self) {
        self.last_us = None;
    }

    /// Record an edge at `now_us`.  `high` is the line level after the
    /// edge, so a rising edge closes a mark.
    pub fn edge(&mut self, now_us: u64, high: bool) -> Option<Pulse> {
        let last = self.last_us.replace(now_us)?;
        let width = now_us.saturating_sub(last).min(u32::MAX as u64) as u32;
        Some(if high { Pulse::Mark(width) } else { Pulse::Space(width) })
    }
}
