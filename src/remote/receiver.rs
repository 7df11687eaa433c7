//! IR receiver task.
//!
//! Timestamps every edge of the demodulator output (idle high, low while
//! the 38 kHz carrier is present), feeds the widths to the NEC decoder
//! and forwards recognised keys to the control loop.  Repeat frames from
//! a held key are dropped.
//!
//! The control loop blocks on I²C and UART writes for tens of
//! milliseconds, so this task must run on an executor that preempts it
//! (`main.rs` spawns it on an interrupt executor).

use crate::remote::nec::{EdgeClock, NecDecoder, NecFrame};
use crate::remote::{CommandToken, RemoteReceiver};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use embassy_time::{Duration, Instant, Timer};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

/// Tokens waiting for the control loop.
pub const TOKEN_QUEUE: usize = 4;

/// A full NEC frame takes under 70 ms; a quiet line this long ends any
/// half-received one.
const FRAME_TIMEOUT_MS: u64 = 120;

pub type TokenSender = Sender<'static, CriticalSectionRawMutex, CommandToken, TOKEN_QUEUE>;
pub type TokenReceiver = Receiver<'static, CriticalSectionRawMutex, CommandToken, TOKEN_QUEUE>;

/// Run the receiver forever.
pub async fn ir_task<P>(mut pin: P, tx: TokenSender) -> !
where
    P: Wait + InputPin,
{
    let mut decoder = NecDecoder::new();
    let mut clock = EdgeClock::new();

    loop {
        let edge = select(
            pin.wait_for_any_edge(),
            Timer::after(Duration::from_millis(FRAME_TIMEOUT_MS)),
        )
        .await;
        match edge {
            Either::First(Ok(())) => {}
            Either::First(Err(_)) => continue,
            Either::Second(()) => {
                decoder.reset();
                clock.reset();
                continue;
            }
        }

        let now = Instant::now().as_micros();
        let Ok(high) = pin.is_high() else {
            continue;
        };
        let Some(pulse) = clock.edge(now, high) else {
            continue;
        };

        let Some(NecFrame::Data(code)) = decoder.feed(pulse) else {
            continue;
        };
        match CommandToken::from_nec(code) {
            Some(token) => {
                if tx.try_send(token).is_err() {
                    warn!("IR: token queue full, dropping {}", token);
                }
            }
            None => debug!("IR: unmapped code {:#x}", code),
        }
    }
}

/// Loop-side end of the token queue.
pub struct ChannelRemote {
    rx: TokenReceiver,
}

impl ChannelRemote {
    pub fn new(rx: TokenReceiver) -> Self {
        Self { rx }
    }
}

impl RemoteReceiver for ChannelRemote {
    fn poll_token(&mut self) -> Option<CommandToken> {
        self.rx.try_receive().ok()
    }
}
