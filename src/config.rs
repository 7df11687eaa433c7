//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, catalogue sizes and
//! protocol constants live here so they can be tuned in one place.

// Access

/// UID of the one card allowed to unlock the player.
///
/// Read your card once with `DEFMT_LOG=debug` (the reader logs every UID
/// it sees) and paste the bytes here.
pub const AUTHORIZED_UID: &[u8] = &[0x93, 0x2B, 0x7C, 0x1A];

/// Longest UID an ISO 14443A card can report (triple size).
pub const MAX_UID_LEN: usize = 10;

// Playback

/// Highest volume step accepted by the DFPlayer.
pub const VOL_MAX: u8 = 30;

/// Volume applied at boot.
pub const VOL_DEFAULT: u8 = 10;

/// Number of tracks on the SD card (files `0001.mp3` .. `0008.mp3`).
pub const TOTAL_TRACKS: usize = 8;

// Display

/// Tracks listed per page on the selection screen.
pub const TRACKS_PER_PAGE: usize = 4;

/// Visible title characters on the selection list (after the "n. " prefix).
pub const MAX_TITLE_LEN_LIST: usize = 18;

/// Visible title characters on the now-playing and recommendation screens.
pub const MAX_TITLE_LEN_PLAY: usize = 20;

/// Header plus items on the recommendation screen.
pub const MAX_REC_LINES: usize = 5;

/// Longest single recommendation line kept after parsing.
pub const MAX_REC_LINE_LEN: usize = 48;

/// Width of the SSD1306 panel in pixels.
pub const DISPLAY_WIDTH: i32 = 128;

/// Minimum time between two animation steps (ms).
pub const SCROLL_INTERVAL_MS: u64 = 300;

/// Boot splash hold time before the locked screen appears (ms).
pub const SPLASH_MS: u64 = 2_000;

// Feedback tones

/// High tone for a granted card.
pub const SUCCESS_FREQ_HZ: u32 = 1_500;

/// Low tone for a rejected card.
pub const FAIL_FREQ_HZ: u32 = 350;

/// Length of one beep (ms).
pub const BEEP_DURATION_MS: u32 = 75;

// Command bus

/// Longest request line accepted on the command bus, newline excluded.
pub const BUS_LINE_CAPACITY: usize = 256;

/// UART baud rate of the command bus link.
pub const BUS_BAUD: u32 = 115_200;

/// UART baud rate of the DFPlayer Mini.
pub const DFPLAYER_BAUD: u32 = 9_600;

// Control loop

/// Period of the cooperative control loop (ms).
pub const LOOP_PERIOD_MS: u64 = 5;

// GPIO pin assignments (nRF52840 Feather-style boards)
//
// These are logical names; the concrete `embassy_nrf::peripherals::*`
// pins are picked in `main.rs`.  Adjust for your wiring.
//
//   IR receiver OUT    → P0.03
//   DFPlayer BUSY      → P0.28
//   DFPlayer RX (TX)   → P0.25
//   DFPlayer TX (RX)   → P0.24
//   MFRC522 SDA/CS     → P0.04
//   MFRC522 RST        → P0.05
//   SPI SCK/MOSI/MISO  → P0.14 / P0.13 / P0.15
//   I²C SDA / SCL      → P0.26 / P0.27
//   Buzzer (PWM)       → P0.31
//   Bus UART RX / TX   → P0.08 / P0.06
