//! Screen layouts as pure data.
//!
//! [`compose`] projects the session into a [`Frame`] of positioned text
//! and a volume gauge.  It never mutates state; the display driver only
//! draws what it is given.

use core::fmt::Write;

use crate::config::{DISPLAY_WIDTH, MAX_TITLE_LEN_LIST, MAX_TITLE_LEN_PLAY, VOL_MAX};
use crate::playback::PlaybackState;
use crate::ui::input_logic::{page_count, tracks_on_page};
use crate::ui::{Mode, UiState};
use heapless::{String, Vec};

/// Longest single text element.
pub const TEXT_CAPACITY: usize = 32;

/// Most elements any screen needs.
pub const MAX_ELEMENTS: usize = 8;

/// Top of the first list row.
const LIST_TOP: i32 = 18;
/// Distance between list rows.
const ROW_HEIGHT: i32 = 12;

/// Two glyph sizes: 6×10 body text and a 10×20 headline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontSize {
    Small,
    Large,
}

/// One render instruction.  Coordinates are the top-left corner in pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    Text {
        x: i32,
        y: i32,
        size: FontSize,
        text: String<TEXT_CAPACITY>,
    },
    /// Outlined bar, filled `fill` pixels from the left inside a 1 px border.
    Gauge {
        y: i32,
        width: i32,
        height: i32,
        fill: i32,
    },
}

pub type Frame = Vec<Element, MAX_ELEMENTS>;

/// Sink for finished frames.
pub trait Screen {
    fn render(&mut self, frame: &Frame) -> Result<(), crate::error::Error>;
}

fn text(frame: &mut Frame, x: i32, y: i32, size: FontSize, s: &str) {
    let mut t = String::new();
    for c in s.chars() {
        if t.push(c).is_err() {
            break;
        }
    }
    let _ = frame.push(Element::Text { x, y, size, text: t });
}

fn text_fmt(frame: &mut Frame, x: i32, y: i32, size: FontSize, args: core::fmt::Arguments<'_>) {
    let mut t: String<TEXT_CAPACITY> = String::new();
    let _ = t.write_fmt(args);
    let _ = frame.push(Element::Text { x, y, size, text: t });
}

/// Width in pixels of the gauge fill for a volume.
pub fn volume_fill(volume: u8) -> i32 {
    let inner = DISPLAY_WIDTH - 2;
    volume.min(VOL_MAX) as i32 * inner / VOL_MAX as i32
}

/// Build the frame for the current mode.
pub fn compose(ui: &UiState, playback: &PlaybackState) -> Frame {
    let mut frame = Frame::new();
    match ui.mode() {
        Mode::Locked => {
            text(&mut frame, 0, 1, FontSize::Large, "LOCKED");
            text(&mut frame, 0, 40, FontSize::Small, "Scan Authorized Card");
        }
        Mode::Loading => {
            text(&mut frame, 0, 24, FontSize::Large, "LOADING...");
        }
        Mode::SelectTrack => {
            text_fmt(
                &mut frame,
                0,
                0,
                FontSize::Small,
                format_args!("SELECT TRACK ({}/{}):", ui.page, page_count()),
            );
            for (row, track) in tracks_on_page(ui.page).enumerate() {
                let scroll = &ui.list_scroll[track.index()];
                let window = scroll.window(track.title(), MAX_TITLE_LEN_LIST);
                text_fmt(
                    &mut frame,
                    0,
                    LIST_TOP + row as i32 * ROW_HEIGHT,
                    FontSize::Small,
                    format_args!("{}. {}", track.get(), window),
                );
            }
        }
        Mode::NowPlaying => {
            let status = if playback.playing { "PLAYING" } else { "PAUSED" };
            text(&mut frame, 0, 0, FontSize::Large, status);
            text_fmt(
                &mut frame,
                0,
                20,
                FontSize::Small,
                format_args!("Track {}:", playback.track.get()),
            );
            let title = ui.title_scroll.window(playback.track.title(), MAX_TITLE_LEN_PLAY);
            text(&mut frame, 0, 30, FontSize::Small, title);
            text_fmt(
                &mut frame,
                0,
                40,
                FontSize::Small,
                format_args!("Volume: {} / {}", playback.volume(), VOL_MAX),
            );
            let _ = frame.push(Element::Gauge {
                y: 50,
                width: DISPLAY_WIDTH,
                height: 10,
                fill: volume_fill(playback.volume()),
            });
        }
        Mode::Recommend => {
            let recs = &ui.recommendations;
            if recs.header.is_empty() {
                text(&mut frame, 0, 0, FontSize::Large, "RECOMMENDS");
            } else {
                text(&mut frame, 0, 0, FontSize::Small, recs.header.as_str());
            }
            for (i, item) in recs.items.iter().enumerate() {
                let window = ui.rec_scroll[i].window(item.as_str(), MAX_TITLE_LEN_PLAY);
                text(
                    &mut frame,
                    0,
                    LIST_TOP + i as i32 * ROW_HEIGHT,
                    FontSize::Small,
                    window,
                );
            }
        }
    }
    frame
}
