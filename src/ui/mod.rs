//! User interface subsystem - screen modes, scrolling, OLED rendering.
//!
//! The UI is a pure projection of [`UiState`] and the playback state:
//! commands change state and mark it dirty, the [`scheduler`] decides when
//! to animate and redraw, [`view`] turns state into render instructions
//! and the display driver draws them.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C (embedded only)
//! - **Scheduler**: fixed-cadence scroll animation + dirty redraws

#[cfg(feature = "embedded")]
pub mod display;
pub mod input_logic;
pub mod recommend;
pub mod scheduler;
pub mod view;

use crate::config::TOTAL_TRACKS;
use crate::scroll::ScrollState;
use recommend::{Recommendations, MAX_REC_ITEMS};

/// Screens (modes) the UI can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Waiting for the authorised card.
    Locked,
    /// Paged track list.
    SelectTrack,
    /// Current track, play state and volume.
    NowPlaying,
    /// Recommendation list from the command bus.
    Recommend,
    /// Recommendation request outstanding.
    Loading,
}

impl Mode {
    pub fn all() -> [Mode; 5] {
        [
            Mode::Locked,
            Mode::SelectTrack,
            Mode::NowPlaying,
            Mode::Recommend,
            Mode::Loading,
        ]
    }
}

/// Everything the screen shows that is not playback state.
#[derive(Clone, Debug)]
pub struct UiState {
    mode: Mode,
    /// 1-based, within `1..=input_logic::page_count()`.
    pub page: usize,
    /// True only while a recommendation request is outstanding.
    pub loading: bool,
    /// One window per catalogue title on the selection list.
    pub list_scroll: [ScrollState; TOTAL_TRACKS],
    /// Title window on the now-playing screen.
    pub title_scroll: ScrollState,
    /// One window per recommendation item (the header never scrolls).
    pub rec_scroll: [ScrollState; MAX_REC_ITEMS],
    pub recommendations: Recommendations,
    dirty: bool,
}

impl UiState {
    /// Locked screen, waiting to be drawn.
    pub fn new() -> Self {
        Self {
            mode: Mode::Locked,
            page: 1,
            loading: false,
            list_scroll: [ScrollState::new(); TOTAL_TRACKS],
            title_scroll: ScrollState::new(),
            rec_scroll: [ScrollState::new(); MAX_REC_ITEMS],
            recommendations: Recommendations::default(),
            dirty: true,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch screens.  Always marks the UI for a redraw.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.dirty = true;
    }

    /// Fresh session view: track list, first page, all windows at rest.
    pub fn start_session(&mut self) {
        self.page = 1;
        self.reset_scroll();
        self.set_mode(Mode::SelectTrack);
    }

    /// Drop every session detail and show the locked screen.
    pub fn lock(&mut self) {
        self.page = 1;
        self.loading = false;
        self.recommendations = Recommendations::default();
        self.reset_scroll();
        self.set_mode(Mode::Locked);
    }

    pub fn reset_scroll(&mut self) {
        self.title_scroll.reset();
        self.list_scroll.iter_mut().for_each(ScrollState::reset);
        self.rec_scroll.iter_mut().for_each(ScrollState::reset);
    }

    /// Consume the pending-redraw flag.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
