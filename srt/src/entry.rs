/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: OSL-3.0
 */

//! Operates on individual subtitle entries.
//!
//! # Overview
//!
//! An entry is the fundamental unit of an SRT stream: a sequence marker line, a timing line
//! bounding when the caption is shown, and zero or more lines of caption text. Entries are
//! separated from one another by blank lines.
//!
//! Only the timing line is ever decoded as text. The marker and the caption lines are
//! carried as raw bytes and written back out untouched, so captions survive in whatever
//! encoding they arrived in.


mod entryread;
mod entrywrite;

pub use entryread::*;
pub use entrywrite::*;

use std::fmt;

/// Represents a single subtitle entry.
#[derive(Clone, Debug, Default, Hash, PartialEq)]
pub struct Entry {
    /// The sequence marker line with its terminator stripped. Opaque to this crate; it is
    /// never interpreted as a number, only round-tripped verbatim.
    pub marker: Vec<u8>,
    /// The start/end timing pair, or `None` if the timing line failed to parse.
    pub timing: Option<Timing>,
    /// The caption text lines, terminators stripped, content otherwise unmodified.
    pub text_lines: Vec<Vec<u8>>,
}

/// Bounds when an entry is displayed.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq)]
pub struct Timing {
    pub start: Timecode,
    pub end: Timecode,
}

/// A single `HH:MM:SS,mmm` instant.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq)]
pub struct Timecode {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub milliseconds: u16,
}

impl Timecode {
    /// Returns this timecode as a count of milliseconds since `00:00:00,000`.
    pub fn total_millis(&self) -> i64 {
        self.hours as i64 * 3_600_000
            + self.minutes as i64 * 60_000
            + self.seconds as i64 * 1_000
            + self.milliseconds as i64
    }

    /// Re-derives the four fields from a millisecond count. Returns `None` if the count is
    /// negative or the hour field would not fit in two digits.
    pub fn from_total_millis(millis: i64) -> Option<Self> {
        if !(0..360_000_000).contains(&millis) {
            return None
        }
        Some(
            Self {
                hours: (millis / 3_600_000) as u8,
                minutes: (millis % 3_600_000 / 60_000) as u8,
                seconds: (millis % 60_000 / 1_000) as u8,
                milliseconds: (millis % 1_000) as u16,
            }
        )
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.milliseconds,
        )
    }
}
