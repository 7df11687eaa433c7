//! DFPlayer Mini serial protocol.
//!
//! Every command is one 10-byte frame:
//!
//! ```text
//! 7E FF 06 CMD FB PH PL CKH CKL EF
//! ```
//!
//! `FB` requests an acknowledgement (always 0 here), `PH:PL` is the
//! big-endian parameter and `CKH:CKL` is the two's complement of the sum
//! of bytes 1..=6.

use crate::catalog::TrackNumber;

/// Length of one command frame.
pub const FRAME_SIZE: usize = 10;

const START: u8 = 0x7E;
const VERSION: u8 = 0xFF;
const LENGTH: u8 = 0x06;
const END: u8 = 0xEF;

/// SD card as playback source.
const SOURCE_TF_CARD: u16 = 0x0002;

/// Commands the player firmware sends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Play `000N.mp3` from the root folder.
    PlayTrack(TrackNumber),
    /// Volume 0..=30.
    SetVolume(u8),
    /// Select the microSD card as source.
    SelectTfCard,
    Stop,
}

impl Command {
    fn code(self) -> u8 {
        match self {
            Command::PlayTrack(_) => 0x03,
            Command::SetVolume(_) => 0x06,
            Command::SelectTfCard => 0x09,
            Command::Stop => 0x16,
        }
    }

    fn param(self) -> u16 {
        match self {
            Command::PlayTrack(track) => track.get() as u16,
            Command::SetVolume(volume) => volume as u16,
            Command::SelectTfCard => SOURCE_TF_CARD,
            Command::Stop => 0,
        }
    }

    /// Serialize to a wire frame.  Returns bytes written, 0 if `buf` is
    /// shorter than [`FRAME_SIZE`].
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < FRAME_SIZE {
            return 0;
        }
        let [ph, pl] = self.param().to_be_bytes();
        let body = [VERSION, LENGTH, self.code(), 0x00, ph, pl];
        let sum = body.iter().fold(0u16, |acc, &b| acc.wrapping_add(b as u16));
        let [ch, cl] = 0u16.wrapping_sub(sum).to_be_bytes();

        buf[0] = START;
        buf[1..7].copy_from_slice(&body);
        buf[7] = ch;
        buf[8] = cl;
        buf[9] = END;
        FRAME_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(cmd: Command) -> [u8; FRAME_SIZE] {
        let mut buf = [0u8; FRAME_SIZE];
        assert_eq!(cmd.serialize(&mut buf), FRAME_SIZE);
        buf
    }

    #[test]
    fn play_track_one() {
        assert_eq!(
            frame(Command::PlayTrack(TrackNumber::FIRST)),
            [0x7E, 0xFF, 0x06, 0x03, 0x00, 0x00, 0x01, 0xFE, 0xF7, 0xEF]
        );
    }

    #[test]
    fn set_volume_ten() {
        assert_eq!(
            frame(Command::SetVolume(10)),
            [0x7E, 0xFF, 0x06, 0x06, 0x00, 0x00, 0x0A, 0xFE, 0xEB, 0xEF]
        );
    }

    #[test]
    fn select_tf_card() {
        assert_eq!(
            frame(Command::SelectTfCard),
            [0x7E, 0xFF, 0x06, 0x09, 0x00, 0x00, 0x02, 0xFE, 0xF0, 0xEF]
        );
    }

    #[test]
    fn stop() {
        assert_eq!(
            frame(Command::Stop),
            [0x7E, 0xFF, 0x06, 0x16, 0x00, 0x00, 0x00, 0xFE, 0xE5, 0xEF]
        );
    }

    #[test]
    fn checksum_cancels_body() {
        let buf = frame(Command::PlayTrack(TrackNumber::LAST));
        let sum = buf[1..7].iter().fold(0u16, |acc, &b| acc.wrapping_add(b as u16));
        let check = u16::from_be_bytes([buf[7], buf[8]]);
        assert_eq!(sum.wrapping_add(check), 0);
    }

    #[test]
    fn serialize_buffer_too_small() {
        let mut buf = [0u8; 9];
        assert_eq!(Command::Stop.serialize(&mut buf), 0);
        assert_eq!(buf, [0u8; 9]);
    }
}
