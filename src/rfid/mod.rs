//! Card access - the gate in front of everything else.
//!
//! The player starts locked.  Presenting the one authorised card unlocks
//! it; only an explicit logout locks it again.
//!
//! ## Components
//!
//! - **AccessGate**: byte-exact UID comparison and the locked flag
//! - **Reader**: MFRC522 13.56 MHz reader over SPI (embedded only)

#[cfg(feature = "embedded")]
pub mod reader;

use crate::config::MAX_UID_LEN;
use heapless::Vec;

/// Card UID as read from the reader (4, 7 or 10 bytes).
pub type Uid = Vec<u8, MAX_UID_LEN>;

/// Source of card scans.
pub trait CredentialReader {
    /// Non-blocking: the UID of a card that was *newly* presented since the
    /// last call, `None` on almost every poll.
    fn poll_new_credential(&mut self) -> Option<Uid>;
}

/// Outcome of presenting a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AuthResult {
    Granted,
    Denied,
}

/// Locked/unlocked state tied to one authorised identity.
#[derive(Clone, Debug)]
pub struct AccessGate {
    authorized: &'static [u8],
    unlocked: bool,
}

impl AccessGate {
    /// A locked gate that opens for `authorized` only.
    pub const fn new(authorized: &'static [u8]) -> Self {
        Self {
            authorized,
            unlocked: false,
        }
    }

    /// Compare `identity` with the authorised UID.
    ///
    /// `Granted` only for an exact length and byte match; unlocks the gate
    /// as a side effect.  A denied attempt never locks an open gate.
    pub fn attempt_authenticate(&mut self, identity: &[u8]) -> AuthResult {
        if identity == self.authorized {
            self.unlocked = true;
            AuthResult::Granted
        } else {
            AuthResult::Denied
        }
    }

    /// Lock the gate.  Idempotent.
    pub fn logout(&mut self) {
        self.unlocked = false;
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}
