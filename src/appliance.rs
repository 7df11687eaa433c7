//! The control loop.
//!
//! [`Appliance`] owns the session and every collaborator.  Each
//! [`Appliance::step`] is one loop iteration:
//!
//! 1. locked: poll the card reader, nothing else;
//! 2. unlocked: take at most one remote token;
//! 3. answer every pending bus call (in any mode);
//! 4. unlocked: sample BUSY for a finished track;
//! 5. redraw if the scheduler says so.
//!
//! Side effects queued by the dispatcher are applied to the peripherals
//! right after the event that caused them.

use crate::audio::AudioModule;
use crate::bus::CommandBus;
use crate::dispatch::{bus_code, dispatch_bus, dispatch_credential, dispatch_token, observe_busy};
use crate::feedback::ToneOutput;
use crate::remote::RemoteReceiver;
use crate::rfid::CredentialReader;
use crate::session::{Effect, Effects, SessionContext};
use crate::ui::scheduler::RenderScheduler;
use crate::ui::view::{compose, Screen};

pub struct Appliance<R, I, A, B, T, D> {
    ctx: SessionContext,
    scheduler: RenderScheduler,
    reader: R,
    remote: I,
    audio: A,
    bus: B,
    tone: T,
    screen: D,
}

impl<R, I, A, B, T, D> Appliance<R, I, A, B, T, D>
where
    R: CredentialReader,
    I: RemoteReceiver,
    A: AudioModule,
    B: CommandBus,
    T: ToneOutput,
    D: Screen,
{
    pub fn new(
        ctx: SessionContext,
        reader: R,
        remote: I,
        audio: A,
        bus: B,
        tone: T,
        screen: D,
    ) -> Self {
        Self {
            ctx,
            scheduler: RenderScheduler::new(),
            reader,
            remote,
            audio,
            bus,
            tone,
            screen,
        }
    }

    /// Replace the render cadence (tests use a zero interval).
    pub fn with_scheduler(mut self, scheduler: RenderScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// One loop iteration at `now_ms`.  Returns whether a frame was drawn.
    pub fn step(&mut self, now_ms: u64) -> bool {
        let mut fx = Effects::new();

        if self.ctx.is_locked() {
            if let Some(uid) = self.reader.poll_new_credential() {
                dispatch_credential(&mut self.ctx, &uid, &mut fx);
                self.apply(&mut fx);
            }
        } else if let Some(token) = self.remote.poll_token() {
            debug!("token {}", token);
            dispatch_token(&mut self.ctx, token, &mut fx);
            self.apply(&mut fx);
        }

        self.serve_bus(&mut fx);

        if !self.ctx.is_locked() {
            let level = self.audio.busy_level();
            if observe_busy(&mut self.ctx, level, &mut fx) {
                self.apply(&mut fx);
            }
        }

        self.render(now_ms)
    }

    fn serve_bus(&mut self, fx: &mut Effects) {
        while let Some(call) = self.bus.poll_call() {
            let result = call.and_then(|call| {
                debug!("bus call {}", call);
                dispatch_bus(&mut self.ctx, &call, fx)
            });
            let code = bus_code(result);
            self.apply(fx);
            self.bus.respond(code);
        }
    }

    fn apply(&mut self, fx: &mut Effects) {
        for effect in fx.as_slice() {
            let result = match *effect {
                Effect::PlayTrack(track) => self.audio.play_track(track),
                Effect::Stop => self.audio.stop(),
                Effect::SetVolume(volume) => self.audio.set_volume(volume),
                Effect::Publish(event) => {
                    self.bus.publish(event);
                    Ok(())
                }
                Effect::Chime(chime) => {
                    self.tone.play(chime);
                    Ok(())
                }
            };
            if let Err(e) = result {
                warn!("audio command failed: {}", e);
            }
        }
        fx.clear();
    }

    fn render(&mut self, now_ms: u64) -> bool {
        if !self
            .scheduler
            .poll(now_ms, &mut self.ctx.ui, &self.ctx.playback)
        {
            return false;
        }
        let frame = compose(&self.ctx.ui, &self.ctx.playback);
        if let Err(e) = self.screen.render(&frame) {
            warn!("display update failed: {}", e);
        }
        true
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn remote_mut(&mut self) -> &mut I {
        &mut self.remote
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn tone_mut(&mut self) -> &mut T {
        &mut self.tone
    }

    pub fn screen_mut(&mut self) -> &mut D {
        &mut self.screen
    }
}
