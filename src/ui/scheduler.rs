//! Render cadence.
//!
//! Scroll windows advance at a fixed interval no matter how often the
//! control loop spins, so text moves at the same speed on every board.
//! State changes made by commands are drawn on the next poll without
//! waiting for the interval.

use crate::catalog::TrackNumber;
use crate::config::{MAX_TITLE_LEN_LIST, MAX_TITLE_LEN_PLAY, SCROLL_INTERVAL_MS};
use crate::playback::PlaybackState;
use crate::ui::{Mode, UiState};

pub struct RenderScheduler {
    interval_ms: u64,
    last_step_ms: u64,
}

impl RenderScheduler {
    pub const fn new() -> Self {
        Self::with_interval(SCROLL_INTERVAL_MS)
    }

    pub const fn with_interval(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_step_ms: 0,
        }
    }

    /// One loop tick.  Returns `true` when the screen should be redrawn.
    pub fn poll(&mut self, now_ms: u64, ui: &mut UiState, playback: &PlaybackState) -> bool {
        let changed = ui.take_dirty();

        if now_ms.saturating_sub(self.last_step_ms) < self.interval_ms {
            return changed;
        }
        self.last_step_ms = now_ms;

        animate(ui, playback) || changed
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the scroll windows visible in the current mode.  Returns
/// whether this mode wants a redraw for the step.
fn animate(ui: &mut UiState, playback: &PlaybackState) -> bool {
    match ui.mode() {
        Mode::Locked => false,
        Mode::SelectTrack => {
            let mut moved = false;
            for track in TrackNumber::all() {
                moved |= ui.list_scroll[track.index()].advance(track.title(), MAX_TITLE_LEN_LIST);
            }
            moved
        }
        Mode::NowPlaying => {
            ui.title_scroll.advance(playback.track.title(), MAX_TITLE_LEN_PLAY);
            true
        }
        Mode::Recommend => {
            let UiState {
                rec_scroll,
                recommendations,
                ..
            } = ui;
            for (scroll, item) in rec_scroll.iter_mut().zip(recommendations.items.iter()) {
                scroll.advance(item.as_str(), MAX_TITLE_LEN_PLAY);
            }
            true
        }
        Mode::Loading => ui.loading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::recommend::Recommendations;

    fn session_ui() -> UiState {
        let mut ui = UiState::new();
        ui.start_session();
        ui
    }

    #[test]
    fn dirty_state_redraws_immediately() {
        let mut sched = RenderScheduler::new();
        let mut ui = UiState::new();
        assert!(sched.poll(10, &mut ui, &PlaybackState::new()));
        assert!(!sched.poll(20, &mut ui, &PlaybackState::new()));
    }

    #[test]
    fn locked_never_animates() {
        let mut sched = RenderScheduler::new();
        let mut ui = UiState::new();
        ui.take_dirty();
        for t in 1..20 {
            assert!(!sched.poll(t * 300, &mut ui, &PlaybackState::new()));
        }
    }

    #[test]
    fn nothing_happens_inside_the_interval() {
        let mut sched = RenderScheduler::new();
        let mut ui = session_ui();
        ui.take_dirty();
        assert!(sched.poll(300, &mut ui, &PlaybackState::new()));
        let offset = ui.list_scroll[1].offset;
        assert!(!sched.poll(599, &mut ui, &PlaybackState::new()));
        assert_eq!(ui.list_scroll[1].offset, offset);
        assert!(sched.poll(600, &mut ui, &PlaybackState::new()));
    }

    #[test]
    fn selection_list_scrolls_only_long_titles() {
        let mut sched = RenderScheduler::new();
        let mut ui = session_ui();
        sched.poll(300, &mut ui, &PlaybackState::new());
        // "LOST IN THE ECHO - Linkin Park" and friends move...
        assert_eq!(ui.list_scroll[1].offset, 1);
        // ..."Am I Dreaming" fits.
        assert_eq!(ui.list_scroll[2].offset, 0);
    }

    #[test]
    fn now_playing_always_redraws() {
        let mut sched = RenderScheduler::new();
        let mut ui = UiState::new();
        ui.set_mode(Mode::NowPlaying);
        ui.take_dirty();
        let playback = PlaybackState::new();
        for t in 1..5 {
            assert!(sched.poll(t * 300, &mut ui, &playback));
        }
        // "Glorious - Macklemore" is 21 chars: bounces between 0 and 1.
        assert!(ui.title_scroll.offset <= 1);
    }

    #[test]
    fn recommend_scrolls_items_not_header() {
        let mut sched = RenderScheduler::new();
        let mut ui = UiState::new();
        let payload = "A very long header that never scrolls|Short|A recommendation that is long";
        ui.recommendations = Recommendations::parse(payload);
        ui.set_mode(Mode::Recommend);
        sched.poll(300, &mut ui, &PlaybackState::new());
        assert_eq!(ui.rec_scroll[0].offset, 0);
        assert_eq!(ui.rec_scroll[1].offset, 1);
        assert_eq!(ui.rec_scroll[2].offset, 0);
    }

    #[test]
    fn loading_redraws_only_while_outstanding() {
        let mut sched = RenderScheduler::new();
        let mut ui = UiState::new();
        ui.set_mode(Mode::Loading);
        ui.take_dirty();
        ui.loading = true;
        assert!(sched.poll(300, &mut ui, &PlaybackState::new()));
        ui.loading = false;
        assert!(!sched.poll(600, &mut ui, &PlaybackState::new()));
    }
}
