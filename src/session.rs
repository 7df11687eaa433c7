//! Session context - all mutable player state in one place.
//!
//! There are no globals: the control loop owns one [`SessionContext`] and
//! lends it to the dispatcher and the render step by `&mut`.  Commands
//! never talk to hardware directly; they queue [`Effect`]s that the loop
//! applies to the peripherals afterwards.

use crate::audio::FinishEdge;
use crate::bus::BusEvent;
use crate::catalog::TrackNumber;
use crate::feedback::Chime;
use crate::playback::PlaybackState;
use crate::rfid::AccessGate;
use crate::ui::{Mode, UiState};
use heapless::Vec;

/// Most side effects a single dispatch can produce.
pub const MAX_EFFECTS: usize = 8;

/// A side effect requested by a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    PlayTrack(TrackNumber),
    Stop,
    SetVolume(u8),
    Publish(BusEvent),
    Chime(Chime),
}

/// Ordered side effects of one or more dispatches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Effects(Vec<Effect, MAX_EFFECTS>);

impl Effects {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, effect: Effect) {
        if self.0.push(effect).is_err() {
            warn!("effect queue full, dropping {}", effect);
        }
    }

    pub fn as_slice(&self) -> &[Effect] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// The single session: gate, playback, UI and the BUSY edge detector.
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub gate: AccessGate,
    pub playback: PlaybackState,
    pub ui: UiState,
    pub finish: FinishEdge,
}

impl SessionContext {
    /// Locked player that opens for `authorized`.
    pub fn new(authorized: &'static [u8]) -> Self {
        Self {
            gate: AccessGate::new(authorized),
            playback: PlaybackState::new(),
            ui: UiState::new(),
            finish: FinishEdge::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.ui.mode()
    }

    pub fn is_locked(&self) -> bool {
        self.ui.mode() == Mode::Locked
    }

    /// `Locked` mode if and only if the gate is closed.
    pub fn is_consistent(&self) -> bool {
        self.is_locked() != self.gate.is_unlocked()
    }
}
