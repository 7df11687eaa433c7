//! Unified error type for tunegate.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
///
/// Nothing here is fatal: callers log the error and keep the current
/// state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Session
    /// The player is locked; only a card scan can change that.
    Locked,

    // Arguments
    /// Track argument is not a number in `1..=TOTAL_TRACKS`.
    InvalidTrack,

    /// Volume argument is not a number.
    InvalidVolume,

    // Command bus
    /// Request names an operation the bus does not expose.
    UnknownOperation,

    /// Request line exceeded `BUS_LINE_CAPACITY` and was dropped.
    LineTooLong,

    // Peripherals
    /// I²C transaction to the display failed.
    Display,

    /// UART write to the audio module failed.
    Audio,

    /// SPI transaction to the card reader failed.
    Reader,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

impl Error {
    /// Result code reported on the command bus for a failed call.
    pub const BUS_CODE: i32 = -1;
}
