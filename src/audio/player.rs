//! DFPlayer Mini driver - UARTE TX for commands, GPIO input for BUSY.

use crate::audio::dfplayer::{Command, FRAME_SIZE};
use crate::audio::{AudioModule, Level};
use crate::catalog::TrackNumber;
use crate::error::Error;
use embassy_nrf::gpio::Input;
use embassy_nrf::uarte::{self, UarteTx};
use embassy_time::{block_for, Duration};

/// The module drops commands that arrive too close together at power-up.
const BOOT_SETTLE_MS: u64 = 50;

pub struct DfPlayer<'d, T: uarte::Instance> {
    tx: UarteTx<'d, T>,
    busy: Input<'d>,
}

impl<'d, T: uarte::Instance> DfPlayer<'d, T> {
    pub fn new(tx: UarteTx<'d, T>, busy: Input<'d>) -> Self {
        Self { tx, busy }
    }

    /// Select the SD card and apply the starting volume.  The volume is
    /// sent twice because the first write after power-up is often lost.
    pub fn boot(&mut self, volume: u8) -> Result<(), Error> {
        self.send(Command::SelectTfCard)?;
        self.send(Command::SetVolume(volume))?;
        block_for(Duration::from_millis(BOOT_SETTLE_MS));
        self.send(Command::SetVolume(volume))?;
        info!("DFPlayer ready, volume {}", volume);
        Ok(())
    }

    fn send(&mut self, command: Command) -> Result<(), Error> {
        let mut frame = [0u8; FRAME_SIZE];
        let n = command.serialize(&mut frame);
        if n == 0 {
            return Err(Error::BufferOverflow);
        }
        self.tx
            .blocking_write(&frame[..n])
            .map_err(|_| Error::Audio)
    }
}

impl<'d, T: uarte::Instance> AudioModule for DfPlayer<'d, T> {
    fn play_track(&mut self, track: TrackNumber) -> Result<(), Error> {
        self.send(Command::PlayTrack(track))
    }

    fn stop(&mut self) -> Result<(), Error> {
        self.send(Command::Stop)
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), Error> {
        self.send(Command::SetVolume(volume))
    }

    fn busy_level(&mut self) -> Level {
        if self.busy.is_high() {
            Level::High
        } else {
            Level::Low
        }
    }
}
