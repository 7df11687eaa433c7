//! Command handlers.
//!
//! Shared by the remote-control path and the command bus: same state
//! change, same effects, only the trigger differs.  Handlers assume an
//! unlocked session; [`crate::dispatch`] enforces that.

use crate::bus::BusEvent;
use crate::catalog::TrackNumber;
use crate::error::Error;
use crate::feedback::Chime;
use crate::playback::parse_volume;
use crate::rfid::AuthResult;
use crate::session::{Effect, Effects, SessionContext};
use crate::ui::input_logic::{next_page, prev_page};
use crate::ui::recommend::Recommendations;
use crate::ui::Mode;

impl SessionContext {
    /// Check a scanned card.  Granted opens a fresh session on the track
    /// list; both outcomes chime.
    pub fn authenticate(&mut self, uid: &[u8], fx: &mut Effects) -> AuthResult {
        let result = self.gate.attempt_authenticate(uid);
        match result {
            AuthResult::Granted => {
                info!("ACCESS GRANTED - player unlocked");
                self.ui.start_session();
                fx.push(Effect::Chime(Chime::Success));
            }
            AuthResult::Denied => {
                info!("ACCESS DENIED - unknown card {=[u8]:X}", uid);
                fx.push(Effect::Chime(Chime::Failure));
            }
        }
        result
    }

    /// Toggle play/stop.  Starting (re)plays the current track from the
    /// top.  Returns the new playing flag.
    pub fn pause(&mut self, fx: &mut Effects) -> bool {
        if self.playback.playing {
            fx.push(Effect::Stop);
            fx.push(Effect::Publish(BusEvent::StopTrack));
            self.playback.playing = false;
        } else {
            let track = self.playback.track;
            fx.push(Effect::PlayTrack(track));
            fx.push(Effect::Publish(BusEvent::PlayTrack(track)));
            self.playback.playing = true;
        }
        self.finish.arm();
        self.ui.set_mode(Mode::NowPlaying);
        self.playback.playing
    }

    pub fn next(&mut self, fx: &mut Effects) -> TrackNumber {
        self.play_track(self.playback.track.next(), fx)
    }

    pub fn previous(&mut self, fx: &mut Effects) -> TrackNumber {
        self.play_track(self.playback.track.prev(), fx)
    }

    /// Start `track` from the top and show it.
    pub fn play_track(&mut self, track: TrackNumber, fx: &mut Effects) -> TrackNumber {
        self.playback.track = track;
        self.playback.playing = true;
        self.finish.arm();
        self.ui.reset_scroll();
        self.ui.set_mode(Mode::NowPlaying);
        fx.push(Effect::PlayTrack(track));
        fx.push(Effect::Publish(BusEvent::PlayTrack(track)));
        debug!("playing track {}", track.get());
        track
    }

    /// `play_track` from a bus argument.  Invalid input changes nothing.
    pub fn play_track_arg(&mut self, arg: &str, fx: &mut Effects) -> Result<TrackNumber, Error> {
        let track = TrackNumber::parse(arg)?;
        Ok(self.play_track(track, fx))
    }

    /// Clamp, store and apply a volume.  Returns the stored value.
    pub fn set_volume(&mut self, requested: i32, fx: &mut Effects) -> u8 {
        let volume = self.playback.set_volume(requested);
        fx.push(Effect::SetVolume(volume));
        self.ui.set_mode(Mode::NowPlaying);
        volume
    }

    /// `set_volume` from a bus argument.  Non-numeric input changes nothing.
    pub fn set_volume_arg(&mut self, arg: &str, fx: &mut Effects) -> Result<u8, Error> {
        let requested = parse_volume(arg)?;
        Ok(self.set_volume(requested, fx))
    }

    pub fn increase_volume(&mut self, fx: &mut Effects) -> u8 {
        self.set_volume(self.playback.volume() as i32 + 1, fx)
    }

    pub fn decrease_volume(&mut self, fx: &mut Effects) -> u8 {
        self.set_volume(self.playback.volume() as i32 - 1, fx)
    }

    pub fn volume(&self) -> u8 {
        self.playback.volume()
    }

    /// Show the loading screen and ask the bus for recommendations.  The
    /// answer arrives later through [`Self::display_recommendations`].
    pub fn request_recommendations(&mut self, fx: &mut Effects) {
        self.ui.loading = true;
        self.ui.set_mode(Mode::Loading);
        fx.push(Effect::Publish(BusEvent::Recommendations));
    }

    /// Replace the recommendation list and show it.  Parsing happens
    /// before any state is touched, so the screen switches in one go.
    pub fn display_recommendations(&mut self, payload: &str) {
        let recs = Recommendations::parse(payload);
        debug!("recommendations: {} items", recs.items.len());
        self.ui.recommendations = recs;
        self.ui.loading = false;
        self.ui.reset_scroll();
        self.ui.set_mode(Mode::Recommend);
    }

    /// Flip to the next (`forward`) or previous list page, wrapping.
    pub fn change_page(&mut self, forward: bool) {
        self.ui.page = if forward {
            next_page(self.ui.page)
        } else {
            prev_page(self.ui.page)
        };
        self.ui.set_mode(Mode::SelectTrack);
    }

    pub fn show_track_list(&mut self) {
        self.ui.set_mode(Mode::SelectTrack);
    }

    /// Stop playback, forget the session and lock.  Idempotent.
    pub fn logout(&mut self, fx: &mut Effects) {
        if self.playback.playing {
            fx.push(Effect::Stop);
            fx.push(Effect::Publish(BusEvent::StopTrack));
        }
        self.playback.reset();
        self.finish.arm();
        self.ui.lock();
        self.gate.logout();
        info!("logged out - player locked");
    }
}
