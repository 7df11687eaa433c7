//! tunegate - a card-gated, IR-remote controlled music player.
//!
//! Everything that can run without hardware lives here and is tested on
//! the host: the session state machine, scroll math, the IR, DFPlayer and
//! command-bus codecs, screen layouts and the control loop itself.
//! Peripherals are reached only through small traits
//! ([`rfid::CredentialReader`], [`remote::RemoteReceiver`],
//! [`audio::AudioModule`], [`bus::CommandBus`], [`feedback::ToneOutput`],
//! [`ui::view::Screen`]); their nRF52840 implementations are compiled
//! with the `embedded` feature and wired up in `main.rs`.
//!
//! Usage: `cargo test` on the host, `cargo run --release --features embedded`
//! with a probe attached.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod appliance;
pub mod audio;
pub mod bus;
pub mod catalog;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod feedback;
pub mod playback;
pub mod remote;
pub mod rfid;
pub mod scroll;
pub mod session;
pub mod ui;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
