//! Event routing.
//!
//! Turns the four kinds of input (card scans, remote tokens, bus calls
//! and BUSY-line polls) into command handler calls, applying the lock
//! and mode rules first.

use crate::audio::Level;
use crate::bus::{BusCall, Operation};
use crate::error::Error;
use crate::remote::CommandToken;
use crate::rfid::AuthResult;
use crate::session::{Effects, SessionContext};
use crate::ui::Mode;

/// Handle a scanned card.  Ignored (`None`) unless locked.
pub fn dispatch_credential(
    ctx: &mut SessionContext,
    uid: &[u8],
    fx: &mut Effects,
) -> Option<AuthResult> {
    if !ctx.is_locked() {
        return None;
    }
    Some(ctx.authenticate(uid, fx))
}

/// Handle one remote-control token.
///
/// Rules, in order:
/// 1. locked: ignore everything;
/// 2. `Ch` always returns to the track list;
/// 3. on the recommendation screen any other key first leaves it, to
///    now-playing when a track plays, else to the track list, and is then
///    handled against that new mode;
/// 4. page keys only act on the track list or while nothing plays;
/// 5. the remaining keys map one-to-one onto commands.
pub fn dispatch_token(ctx: &mut SessionContext, token: CommandToken, fx: &mut Effects) {
    if ctx.is_locked() {
        debug!("locked, ignoring {}", token);
        return;
    }

    if token == CommandToken::Ch {
        ctx.show_track_list();
        return;
    }

    if ctx.mode() == Mode::Recommend {
        let back = if ctx.playback.playing {
            Mode::NowPlaying
        } else {
            Mode::SelectTrack
        };
        ctx.ui.set_mode(back);
    }

    let browsing = ctx.mode() == Mode::SelectTrack || !ctx.playback.playing;

    match token {
        CommandToken::ChNext if browsing => ctx.change_page(true),
        CommandToken::ChPrev if browsing => ctx.change_page(false),
        CommandToken::ChNext | CommandToken::ChPrev | CommandToken::Ch => {}
        CommandToken::Next => {
            ctx.next(fx);
        }
        CommandToken::Prev => {
            ctx.previous(fx);
        }
        CommandToken::PlayPause => {
            ctx.pause(fx);
        }
        CommandToken::VolUp => {
            ctx.increase_volume(fx);
        }
        CommandToken::VolDown => {
            ctx.decrease_volume(fx);
        }
        CommandToken::Track(track) => {
            ctx.play_track(track, fx);
        }
        CommandToken::Eq => ctx.request_recommendations(fx),
        CommandToken::Logout => ctx.logout(fx),
    }
}

/// Handle one bus call.  `Ok` carries the value to report back.
///
/// While locked only `getVolume` and `logout` are served.
pub fn dispatch_bus(
    ctx: &mut SessionContext,
    call: &BusCall,
    fx: &mut Effects,
) -> Result<i32, Error> {
    if ctx.is_locked() && !matches!(call.op, Operation::GetVolume | Operation::Logout) {
        return Err(Error::Locked);
    }

    let arg = call.arg.as_str();
    let value = match call.op {
        Operation::Pause => ctx.pause(fx) as i32,
        Operation::PlayNext => ctx.next(fx).get() as i32,
        Operation::PlayPrevious => ctx.previous(fx).get() as i32,
        Operation::SetVolume => ctx.set_volume_arg(arg, fx)? as i32,
        Operation::PlayTrack => ctx.play_track_arg(arg, fx)?.get() as i32,
        Operation::IncreaseVol => ctx.increase_volume(fx) as i32,
        Operation::DecreaseVol => ctx.decrease_volume(fx) as i32,
        Operation::GetVolume => ctx.volume() as i32,
        Operation::DisplayRecs => {
            ctx.display_recommendations(arg);
            1
        }
        Operation::Logout => {
            ctx.logout(fx);
            1
        }
    };
    Ok(value)
}

/// Bus result code: the value on success, `-1` on any failure.
pub fn bus_code(result: Result<i32, Error>) -> i32 {
    match result {
        Ok(value) => value,
        Err(e) => {
            debug!("bus call failed: {}", e);
            Error::BUS_CODE
        }
    }
}

/// Feed one BUSY-line poll.  A finished track advances to the next one.
/// Returns whether it did.
pub fn observe_busy(ctx: &mut SessionContext, level: Level, fx: &mut Effects) -> bool {
    if ctx.is_locked() {
        return false;
    }
    if ctx.finish.observe(level, ctx.playback.playing) {
        debug!("track {} finished", ctx.playback.track.get());
        ctx.next(fx);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::BusEvent;
    use crate::catalog::TrackNumber;
    use crate::config::{AUTHORIZED_UID, VOL_DEFAULT, VOL_MAX};
    use crate::feedback::Chime;
    use crate::session::Effect;

    fn unlocked() -> SessionContext {
        let mut ctx = SessionContext::new(AUTHORIZED_UID);
        dispatch_credential(&mut ctx, AUTHORIZED_UID, &mut Effects::new());
        ctx
    }

    fn track(n: u8) -> TrackNumber {
        TrackNumber::new(n).unwrap()
    }

    fn call(op: Operation, arg: &str) -> BusCall {
        BusCall::new(op, arg)
    }

    #[test]
    fn authorised_card_unlocks_with_success_chime() {
        let mut ctx = SessionContext::new(AUTHORIZED_UID);
        let mut fx = Effects::new();
        assert_eq!(
            dispatch_credential(&mut ctx, AUTHORIZED_UID, &mut fx),
            Some(AuthResult::Granted)
        );
        assert_eq!(ctx.mode(), Mode::SelectTrack);
        assert_eq!(ctx.ui.page, 1);
        assert_eq!(fx.as_slice(), &[Effect::Chime(Chime::Success)]);
        assert!(ctx.is_consistent());
    }

    #[test]
    fn unknown_card_stays_locked_with_failure_chime() {
        let mut ctx = SessionContext::new(AUTHORIZED_UID);
        let mut fx = Effects::new();
        assert_eq!(
            dispatch_credential(&mut ctx, &[0xDE, 0xAD, 0xBE, 0xEF], &mut fx),
            Some(AuthResult::Denied)
        );
        assert_eq!(ctx.mode(), Mode::Locked);
        assert_eq!(fx.as_slice(), &[Effect::Chime(Chime::Failure)]);
    }

    #[test]
    fn cards_ignored_once_unlocked() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        assert_eq!(dispatch_credential(&mut ctx, &[1, 2, 3, 4], &mut fx), None);
        assert!(fx.is_empty());
        assert!(ctx.gate.is_unlocked());
    }

    #[test]
    fn tokens_ignored_while_locked() {
        let mut ctx = SessionContext::new(AUTHORIZED_UID);
        let mut fx = Effects::new();
        for token in CommandToken::all() {
            dispatch_token(&mut ctx, token, &mut fx);
        }
        assert!(fx.is_empty());
        assert_eq!(ctx.mode(), Mode::Locked);
        assert!(!ctx.playback.playing);
    }

    #[test]
    fn digit_plays_track() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        dispatch_token(&mut ctx, CommandToken::Track(track(5)), &mut fx);
        assert_eq!(ctx.playback.track, track(5));
        assert!(ctx.playback.playing);
        assert_eq!(ctx.mode(), Mode::NowPlaying);
        assert_eq!(
            fx.as_slice(),
            &[
                Effect::PlayTrack(track(5)),
                Effect::Publish(BusEvent::PlayTrack(track(5)))
            ]
        );
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        ctx.playback.track = track(8);
        dispatch_token(&mut ctx, CommandToken::Next, &mut fx);
        assert_eq!(ctx.playback.track, track(1));
        dispatch_token(&mut ctx, CommandToken::Prev, &mut fx);
        assert_eq!(ctx.playback.track, track(8));
    }

    #[test]
    fn play_pause_toggles_and_publishes() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        dispatch_token(&mut ctx, CommandToken::PlayPause, &mut fx);
        assert!(ctx.playback.playing);
        fx.clear();
        dispatch_token(&mut ctx, CommandToken::PlayPause, &mut fx);
        assert!(!ctx.playback.playing);
        assert_eq!(ctx.mode(), Mode::NowPlaying);
        assert_eq!(
            fx.as_slice(),
            &[Effect::Stop, Effect::Publish(BusEvent::StopTrack)]
        );
    }

    #[test]
    fn volume_keys_clamp() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        for _ in 0..40 {
            dispatch_token(&mut ctx, CommandToken::VolUp, &mut fx);
            fx.clear();
        }
        assert_eq!(ctx.volume(), VOL_MAX);
        for _ in 0..40 {
            dispatch_token(&mut ctx, CommandToken::VolDown, &mut fx);
            fx.clear();
        }
        assert_eq!(ctx.volume(), 0);
        assert_eq!(ctx.mode(), Mode::NowPlaying);
    }

    #[test]
    fn ch_always_shows_track_list() {
        for mode in [Mode::NowPlaying, Mode::Recommend, Mode::Loading] {
            let mut ctx = unlocked();
            ctx.playback.playing = true;
            ctx.ui.set_mode(mode);
            dispatch_token(&mut ctx, CommandToken::Ch, &mut Effects::new());
            assert_eq!(ctx.mode(), Mode::SelectTrack);
        }
    }

    #[test]
    fn page_keys_wrap_on_track_list() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        dispatch_token(&mut ctx, CommandToken::ChNext, &mut fx);
        assert_eq!(ctx.ui.page, 2);
        dispatch_token(&mut ctx, CommandToken::ChNext, &mut fx);
        assert_eq!(ctx.ui.page, 1);
        dispatch_token(&mut ctx, CommandToken::ChPrev, &mut fx);
        assert_eq!(ctx.ui.page, 2);
        assert!(fx.is_empty());
    }

    #[test]
    fn page_keys_ignored_on_now_playing_while_playing() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        dispatch_token(&mut ctx, CommandToken::Track(track(2)), &mut fx);
        dispatch_token(&mut ctx, CommandToken::ChNext, &mut fx);
        assert_eq!(ctx.ui.page, 1);
        assert_eq!(ctx.mode(), Mode::NowPlaying);
    }

    #[test]
    fn page_keys_work_on_paused_screen() {
        let mut ctx = unlocked();
        ctx.ui.set_mode(Mode::NowPlaying);
        dispatch_token(&mut ctx, CommandToken::ChNext, &mut Effects::new());
        assert_eq!(ctx.ui.page, 2);
        assert_eq!(ctx.mode(), Mode::SelectTrack);
    }

    #[test]
    fn recommend_exit_then_key_applies() {
        // Playing: leave to now-playing, where page keys do nothing.
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        ctx.playback.playing = true;
        ctx.ui.set_mode(Mode::Recommend);
        dispatch_token(&mut ctx, CommandToken::ChNext, &mut fx);
        assert_eq!(ctx.mode(), Mode::NowPlaying);
        assert_eq!(ctx.ui.page, 1);

        // Stopped: leave to the list, and the same key flips the page.
        let mut ctx = unlocked();
        ctx.ui.set_mode(Mode::Recommend);
        dispatch_token(&mut ctx, CommandToken::ChNext, &mut fx);
        assert_eq!(ctx.mode(), Mode::SelectTrack);
        assert_eq!(ctx.ui.page, 2);
    }

    #[test]
    fn recommend_exit_with_volume_key() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        ctx.ui.set_mode(Mode::Recommend);
        dispatch_token(&mut ctx, CommandToken::VolUp, &mut fx);
        assert_eq!(ctx.volume(), VOL_DEFAULT + 1);
        assert_eq!(ctx.mode(), Mode::NowPlaying);
    }

    #[test]
    fn eq_requests_recommendations() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        dispatch_token(&mut ctx, CommandToken::Eq, &mut fx);
        assert_eq!(ctx.mode(), Mode::Loading);
        assert!(ctx.ui.loading);
        assert_eq!(
            fx.as_slice(),
            &[Effect::Publish(BusEvent::Recommendations)]
        );
    }

    #[test]
    fn logout_key_stops_and_locks() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        dispatch_token(&mut ctx, CommandToken::Track(track(4)), &mut fx);
        dispatch_token(&mut ctx, CommandToken::VolUp, &mut fx);
        fx.clear();
        dispatch_token(&mut ctx, CommandToken::Logout, &mut fx);
        assert_eq!(
            fx.as_slice(),
            &[Effect::Stop, Effect::Publish(BusEvent::StopTrack)]
        );
        assert_eq!(ctx.mode(), Mode::Locked);
        assert!(!ctx.gate.is_unlocked());
        assert_eq!(ctx.playback.track, track(1));
        assert!(!ctx.playback.playing);
        assert_eq!(ctx.volume(), VOL_DEFAULT + 1);
        assert!(ctx.is_consistent());
    }

    #[test]
    fn bus_locked_serves_only_volume_and_logout() {
        let mut ctx = SessionContext::new(AUTHORIZED_UID);
        let mut fx = Effects::new();
        assert_eq!(
            dispatch_bus(&mut ctx, &call(Operation::PlayNext, ""), &mut fx),
            Err(Error::Locked)
        );
        assert_eq!(
            dispatch_bus(&mut ctx, &call(Operation::DisplayRecs, "A|B"), &mut fx),
            Err(Error::Locked)
        );
        assert_eq!(
            dispatch_bus(&mut ctx, &call(Operation::GetVolume, ""), &mut fx),
            Ok(VOL_DEFAULT as i32)
        );
        assert_eq!(
            dispatch_bus(&mut ctx, &call(Operation::Logout, ""), &mut fx),
            Ok(1)
        );
        assert!(fx.is_empty());
        assert_eq!(ctx.mode(), Mode::Locked);
    }

    #[test]
    fn bus_return_values() {
        fn run(ctx: &mut SessionContext, op: Operation, arg: &str) -> Result<i32, Error> {
            dispatch_bus(ctx, &call(op, arg), &mut Effects::new())
        }
        let mut ctx = unlocked();
        assert_eq!(run(&mut ctx, Operation::PlayTrack, "3"), Ok(3));
        assert_eq!(run(&mut ctx, Operation::PlayNext, ""), Ok(4));
        assert_eq!(run(&mut ctx, Operation::PlayPrevious, ""), Ok(3));
        assert_eq!(run(&mut ctx, Operation::Pause, ""), Ok(0));
        assert_eq!(run(&mut ctx, Operation::Pause, ""), Ok(1));
        assert_eq!(run(&mut ctx, Operation::SetVolume, "99"), Ok(30));
        assert_eq!(run(&mut ctx, Operation::SetVolume, "-4"), Ok(0));
        assert_eq!(run(&mut ctx, Operation::IncreaseVol, ""), Ok(1));
        assert_eq!(run(&mut ctx, Operation::DecreaseVol, ""), Ok(0));
        assert_eq!(run(&mut ctx, Operation::GetVolume, ""), Ok(0));
    }

    #[test]
    fn bus_bad_arguments_change_nothing() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        assert_eq!(
            dispatch_bus(&mut ctx, &call(Operation::PlayTrack, "9"), &mut fx),
            Err(Error::InvalidTrack)
        );
        assert_eq!(
            dispatch_bus(&mut ctx, &call(Operation::SetVolume, "loud"), &mut fx),
            Err(Error::InvalidVolume)
        );
        assert!(fx.is_empty());
        assert_eq!(ctx.mode(), Mode::SelectTrack);
        assert_eq!(bus_code(Err(Error::InvalidTrack)), -1);
    }

    #[test]
    fn bus_display_recs_from_loading() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        dispatch_token(&mut ctx, CommandToken::Eq, &mut fx);
        let result = dispatch_bus(
            &mut ctx,
            &call(Operation::DisplayRecs, "For you|Song A|Song B"),
            &mut fx,
        );
        assert_eq!(result, Ok(1));
        assert_eq!(ctx.mode(), Mode::Recommend);
        assert!(!ctx.ui.loading);
        assert_eq!(ctx.ui.recommendations.header.as_str(), "For you");
        assert_eq!(ctx.ui.recommendations.items.len(), 2);
    }

    #[test]
    fn finished_track_advances_once() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        dispatch_token(&mut ctx, CommandToken::Track(track(8)), &mut fx);
        fx.clear();
        assert!(!observe_busy(&mut ctx, Level::Low, &mut fx));
        let advanced = (0..10)
            .filter(|_| observe_busy(&mut ctx, Level::High, &mut fx))
            .count();
        assert_eq!(advanced, 1);
        assert_eq!(ctx.playback.track, track(1));
        assert_eq!(
            fx.as_slice(),
            &[
                Effect::PlayTrack(track(1)),
                Effect::Publish(BusEvent::PlayTrack(track(1)))
            ]
        );
    }

    #[test]
    fn busy_edge_ignored_when_stopped() {
        let mut ctx = unlocked();
        let mut fx = Effects::new();
        observe_busy(&mut ctx, Level::Low, &mut fx);
        assert!(!observe_busy(&mut ctx, Level::High, &mut fx));
        assert!(fx.is_empty());
    }
}
