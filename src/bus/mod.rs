//! External command bus - remote-invocable operations and events.
//!
//! A companion (phone bridge, cloud gateway, laptop) talks to the player
//! over a newline-delimited text protocol on a UART:
//!
//! ```text
//! → playTrack 3        request: operation, space, argument (may be empty)
//! ← =3                 response: integer result, -1 on error
//! ← !PlayTrack 3       event published by the player
//! ```
//!
//! Each operation takes one string argument and returns one integer,
//! identical in effect to the matching remote key.

#[cfg(feature = "embedded")]
pub mod uart;

use core::fmt::Write;

use crate::catalog::TrackNumber;
use crate::config::BUS_LINE_CAPACITY;
use crate::error::Error;
use heapless::{String, Vec};

/// Capacity of one encoded outbound line (response or event).
pub const OUT_LINE_CAPACITY: usize = 32;

/// Data string published with `StopTrack`, kept for bus clients that
/// expect it.
pub const STOP_TRACK_DATA: u16 = 255;

/// Operations exposed on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    Pause,
    PlayNext,
    PlayPrevious,
    SetVolume,
    PlayTrack,
    IncreaseVol,
    DecreaseVol,
    GetVolume,
    DisplayRecs,
    Logout,
}

const OPERATIONS: [(&str, Operation); 10] = [
    ("pause", Operation::Pause),
    ("playNext", Operation::PlayNext),
    ("playPrevious", Operation::PlayPrevious),
    ("setVolume", Operation::SetVolume),
    ("playTrack", Operation::PlayTrack),
    ("increaseVol", Operation::IncreaseVol),
    ("decreaseVol", Operation::DecreaseVol),
    ("getVolume", Operation::GetVolume),
    ("displayRecs", Operation::DisplayRecs),
    ("logout", Operation::Logout),
];

impl Operation {
    /// Look up an operation by its wire name (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        OPERATIONS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, op)| op)
    }

    pub fn name(self) -> &'static str {
        OPERATIONS
            .iter()
            .find(|(_, op)| *op == self)
            .map(|&(n, _)| n)
            .unwrap_or("?")
    }
}

/// One parsed request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusCall {
    pub op: Operation,
    pub arg: String<BUS_LINE_CAPACITY>,
}

impl BusCall {
    pub fn new(op: Operation, arg: &str) -> Self {
        let mut a = String::new();
        push_truncated(&mut a, arg);
        Self { op, arg: a }
    }

    /// Parse `"<operation>[ <argument>]"`.  The argument is everything
    /// after the first space, untrimmed (recommendation payloads may
    /// carry spaces).
    pub fn parse(line: &str) -> Result<Self, Error> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (name, arg) = line.split_once(' ').unwrap_or((line, ""));
        let op = Operation::from_name(name.trim()).ok_or(Error::UnknownOperation)?;
        Ok(Self::new(op, arg))
    }
}

/// Events the player publishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusEvent {
    PlayTrack(TrackNumber),
    StopTrack,
    /// Ask the companion for a recommendation list; answered later with
    /// a `displayRecs` call.
    Recommendations,
}

impl BusEvent {
    pub fn name(self) -> &'static str {
        match self {
            BusEvent::PlayTrack(_) => "PlayTrack",
            BusEvent::StopTrack => "StopTrack",
            BusEvent::Recommendations => "Recommendations",
        }
    }
}

/// Transport for calls, responses and events.
pub trait CommandBus {
    /// Non-blocking: next pending request, if any.  A line that did not
    /// parse still arrives (as `Err`) so it can be answered with `-1`.
    fn poll_call(&mut self) -> Option<Result<BusCall, Error>>;
    /// Send the integer result of the most recent call.
    fn respond(&mut self, result: i32);
    /// Fire-and-forget event.
    fn publish(&mut self, event: BusEvent);
}

/// Encode a response line, newline included.
pub fn encode_response(result: i32) -> String<OUT_LINE_CAPACITY> {
    let mut out = String::new();
    // 1 + 11 digits + newline always fits.
    let _ = writeln!(out, "={}", result);
    out
}

/// Encode an event line, newline included.
pub fn encode_event(event: BusEvent) -> String<OUT_LINE_CAPACITY> {
    let mut out = String::new();
    let _ = match event {
        BusEvent::PlayTrack(track) => writeln!(out, "!{} {}", event.name(), track.get()),
        BusEvent::StopTrack => writeln!(out, "!{} {}", event.name(), STOP_TRACK_DATA),
        BusEvent::Recommendations => writeln!(out, "!{}", event.name()),
    };
    out
}

/// Accumulates UART bytes into request lines.
pub struct LineBuffer {
    buf: Vec<u8, BUS_LINE_CAPACITY>,
    overflowed: bool,
    line_taken: bool,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
            line_taken: false,
        }
    }

    /// Push one byte.  On `\n` returns the finished line without its
    /// `\r\n`; an over-long line is reported once as `Err(LineTooLong)`
    /// when its newline arrives and is otherwise discarded.
    pub fn push(&mut self, byte: u8) -> Option<Result<&str, Error>> {
        if core::mem::take(&mut self.line_taken) {
            self.buf.clear();
        }

        if byte != b'\n' {
            if !self.overflowed && self.buf.push(byte).is_err() {
                self.overflowed = true;
            }
            return None;
        }

        self.line_taken = true;
        if core::mem::take(&mut self.overflowed) {
            return Some(Err(Error::LineTooLong));
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        Some(core::str::from_utf8(&self.buf).map_err(|_| Error::UnknownOperation))
    }

    /// Scan a received chunk up to the first finished line and parse it.
    /// Returns the number of bytes used; anything after the newline is
    /// left for the next call.
    pub fn take_call(&mut self, chunk: &[u8]) -> (usize, Option<Result<BusCall, Error>>) {
        for (i, &byte) in chunk.iter().enumerate() {
            if let Some(line) = self.push(byte) {
                return (i + 1, Some(line.and_then(BusCall::parse)));
            }
        }
        (chunk.len(), None)
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn push_truncated<const N: usize>(out: &mut String<N>, s: &str) {
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_round_trip() {
        for (name, op) in OPERATIONS {
            assert_eq!(Operation::from_name(name), Some(op));
            assert_eq!(op.name(), name);
        }
        assert_eq!(Operation::from_name("PAUSE"), None);
        assert_eq!(Operation::from_name(""), None);
    }

    #[test]
    fn parse_with_and_without_argument() {
        let call = BusCall::parse("playTrack 3").unwrap();
        assert_eq!(call.op, Operation::PlayTrack);
        assert_eq!(call.arg.as_str(), "3");

        let call = BusCall::parse("pause").unwrap();
        assert_eq!(call.op, Operation::Pause);
        assert_eq!(call.arg.as_str(), "");

        let call = BusCall::parse("getVolume\r\n").unwrap();
        assert_eq!(call.op, Operation::GetVolume);
    }

    #[test]
    fn parse_keeps_spaces_in_payload() {
        let call = BusCall::parse("displayRecs Top Picks|Song A|Song B").unwrap();
        assert_eq!(call.op, Operation::DisplayRecs);
        assert_eq!(call.arg.as_str(), "Top Picks|Song A|Song B");
    }

    #[test]
    fn parse_unknown_operation() {
        assert_eq!(BusCall::parse("reboot now"), Err(Error::UnknownOperation));
        assert_eq!(BusCall::parse(""), Err(Error::UnknownOperation));
    }

    #[test]
    fn encodes_responses_and_events() {
        assert_eq!(encode_response(1).as_str(), "=1\n");
        assert_eq!(encode_response(-1).as_str(), "=-1\n");
        assert_eq!(
            encode_event(BusEvent::PlayTrack(TrackNumber::LAST)).as_str(),
            "!PlayTrack 8\n"
        );
        assert_eq!(encode_event(BusEvent::StopTrack).as_str(), "!StopTrack 255\n");
        assert_eq!(
            encode_event(BusEvent::Recommendations).as_str(),
            "!Recommendations\n"
        );
    }

    fn feed<'a>(lb: &'a mut LineBuffer, bytes: &[u8]) -> Option<Result<&'a str, Error>> {
        let (last, head) = bytes.split_last()?;
        for &b in head {
            assert!(lb.push(b).is_none());
        }
        lb.push(*last)
    }

    #[test]
    fn line_buffer_splits_lines() {
        let mut lb = LineBuffer::new();
        assert_eq!(feed(&mut lb, b"pause\r\n"), Some(Ok("pause")));
        assert_eq!(feed(&mut lb, b"getVolume\n"), Some(Ok("getVolume")));
        assert_eq!(feed(&mut lb, b"\n"), Some(Ok("")));
    }

    #[test]
    fn line_buffer_drops_overlong_line_once() {
        let mut lb = LineBuffer::new();
        for _ in 0..BUS_LINE_CAPACITY + 10 {
            assert!(lb.push(b'x').is_none());
        }
        assert_eq!(lb.push(b'\n'), Some(Err(Error::LineTooLong)));
        assert_eq!(feed(&mut lb, b"logout\n"), Some(Ok("logout")));
    }

    /// Drain `chunks` the way the UART reader drains its ring buffer.
    fn drain(lb: &mut LineBuffer, chunks: &[&[u8]]) -> Vec<Result<BusCall, Error>, 8> {
        let mut calls = Vec::new();
        for chunk in chunks {
            let mut rest = *chunk;
            while !rest.is_empty() {
                let (used, call) = lb.take_call(rest);
                assert!(used > 0 && used <= rest.len());
                rest = &rest[used..];
                if let Some(call) = call {
                    calls.push(call).unwrap();
                }
            }
        }
        calls
    }

    #[test]
    fn take_call_stops_after_first_line() {
        let mut lb = LineBuffer::new();
        let (used, call) = lb.take_call(b"pause\nlogout\n");
        assert_eq!(used, 6);
        assert_eq!(call.unwrap().unwrap().op, Operation::Pause);
        assert_eq!(lb.take_call(b"play"), (4, None));
    }

    #[test]
    fn lines_survive_arbitrary_chunking() {
        // A burst that piled up in the receive buffer while the loop was busy.
        let mut lb = LineBuffer::new();
        let calls = drain(
            &mut lb,
            &[b"displayRecs Mix|Song", b" A|Song B\r\nplayTr", b"ack 3\nbogus\ngetVolume\n"],
        );
        assert_eq!(calls.len(), 4);
        let first = calls[0].as_ref().unwrap();
        assert_eq!(first.op, Operation::DisplayRecs);
        assert_eq!(first.arg.as_str(), "Mix|Song A|Song B");
        let second = calls[1].as_ref().unwrap();
        assert_eq!((second.op, second.arg.as_str()), (Operation::PlayTrack, "3"));
        assert!(calls[2].is_err());
        assert_eq!(calls[3].as_ref().unwrap().op, Operation::GetVolume);
    }

    #[test]
    fn line_buffer_rejects_invalid_utf8() {
        let mut lb = LineBuffer::new();
        assert_eq!(feed(&mut lb, &[0xFF, 0xFE, b'\n']), Some(Err(Error::UnknownOperation)));
        assert_eq!(feed(&mut lb, b"pause\n"), Some(Ok("pause")));
    }
}
