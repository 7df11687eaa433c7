//! IR remote control - the 21-key "Car MP3" NEC remote.
//!
//! Raw pulses are decoded to a 32-bit NEC value by [`nec::NecDecoder`]
//! and turned into a typed [`CommandToken`] right at the peripheral
//! boundary; nothing past this module sees a raw code.

pub mod nec;
#[cfg(feature = "embedded")]
pub mod receiver;

use crate::catalog::TrackNumber;

/// Every key the player reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandToken {
    /// CH- : previous page.
    ChPrev,
    /// CH : back to the track list.
    Ch,
    /// CH+ : next page.
    ChNext,
    Prev,
    Next,
    PlayPause,
    VolDown,
    VolUp,
    /// EQ : ask for recommendations.
    Eq,
    /// Number keys 1..=8.
    Track(TrackNumber),
    /// 0 key, repurposed as logout.
    Logout,
}

/// Source of decoded remote tokens.
pub trait RemoteReceiver {
    /// Non-blocking: at most one token per call.
    fn poll_token(&mut self) -> Option<CommandToken>;
}

/// Key table: NEC value (address, !address, command, !command) → token.
const KEYMAP: [(u32, CommandToken); 10] = [
    (0x00FF_A25D, CommandToken::ChPrev),
    (0x00FF_629D, CommandToken::Ch),
    (0x00FF_E21D, CommandToken::ChNext),
    (0x00FF_22DD, CommandToken::Prev),
    (0x00FF_02FD, CommandToken::Next),
    (0x00FF_C23D, CommandToken::PlayPause),
    (0x00FF_E01F, CommandToken::VolDown),
    (0x00FF_A857, CommandToken::VolUp),
    (0x00FF_906F, CommandToken::Eq),
    (0x00FF_6897, CommandToken::Logout),
];

/// Number keys 1..=8, in order.
const TRACK_KEYS: [u32; 8] = [
    0x00FF_30CF,
    0x00FF_18E7,
    0x00FF_7A85,
    0x00FF_10EF,
    0x00FF_38C7,
    0x00FF_5AA5,
    0x00FF_42BD,
    0x00FF_4AB5,
];

impl CommandToken {
    /// Map a decoded NEC value to a token.  Unknown keys are `None`.
    pub fn from_nec(code: u32) -> Option<Self> {
        if let Some(&(_, token)) = KEYMAP.iter().find(|(c, _)| *c == code) {
            return Some(token);
        }
        TRACK_KEYS
            .iter()
            .position(|&c| c == code)
            .and_then(TrackNumber::from_index)
            .map(CommandToken::Track)
    }

    /// Every token, for exhaustive tests.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            CommandToken::ChPrev,
            CommandToken::Ch,
            CommandToken::ChNext,
            CommandToken::Prev,
            CommandToken::Next,
            CommandToken::PlayPause,
            CommandToken::VolDown,
            CommandToken::VolUp,
            CommandToken::Eq,
            CommandToken::Logout,
        ]
        .into_iter()
        .chain(TrackNumber::all().map(CommandToken::Track))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_control_keys() {
        assert_eq!(CommandToken::from_nec(0xFFA25D), Some(CommandToken::ChPrev));
        assert_eq!(CommandToken::from_nec(0xFF629D), Some(CommandToken::Ch));
        assert_eq!(CommandToken::from_nec(0xFFE21D), Some(CommandToken::ChNext));
        assert_eq!(CommandToken::from_nec(0xFFC23D), Some(CommandToken::PlayPause));
        assert_eq!(CommandToken::from_nec(0xFF906F), Some(CommandToken::Eq));
        assert_eq!(CommandToken::from_nec(0xFF6897), Some(CommandToken::Logout));
    }

    #[test]
    fn maps_number_keys_to_tracks() {
        assert_eq!(
            CommandToken::from_nec(0xFF30CF),
            Some(CommandToken::Track(TrackNumber::FIRST))
        );
        assert_eq!(
            CommandToken::from_nec(0xFF4AB5),
            Some(CommandToken::Track(TrackNumber::LAST))
        );
    }

    #[test]
    fn unknown_and_repeat_codes_are_ignored() {
        assert_eq!(CommandToken::from_nec(0xFFFF_FFFF), None);
        assert_eq!(CommandToken::from_nec(0), None);
        // 100+ and 200+ keys on the same remote.
        assert_eq!(CommandToken::from_nec(0xFF9867), None);
        assert_eq!(CommandToken::from_nec(0xFFB04F), None);
    }

    #[test]
    fn vocabulary_has_every_key_once() {
        let tokens: heapless::Vec<CommandToken, 32> = CommandToken::all().collect();
        assert_eq!(tokens.len(), 18);
        for (i, a) in tokens.iter().enumerate() {
            for b in &tokens[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
