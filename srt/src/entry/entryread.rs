/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: OSL-3.0
 */

use super::{Entry, Timecode, Timing};
use std::{
    io::{Error as IoError, Read},
    str::from_utf8,
};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error as ThisError;

/// A specialized [`Result`](std::result::Result) type for entry-reading operations.
pub type ReadResult<T> = Result<T, ReadError>;

// Anchored at the start only; trailing remainder on the timing line is tolerated and
// dropped, the way most players treat it.
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

/// The error type for [ReadEntriesExt].
///
/// A timing line that fails to parse is not an error; it is reported to the [WarningSink]
/// and leaves that entry's timing unset.
#[derive(ThisError, Debug)]
pub enum ReadError {
    /// The input stream could not be read because of an underlying I/O error.
    #[error("entry IO error")]
    IoError {
        /// The underlying I/O error.
        #[from]
        source: IoError,
    },
}

/// Receives parser diagnostics.
///
/// The sink is injected by the caller so that diagnostics land wherever the caller wants
/// them, typically a log facade in a binary and a capture buffer in tests.
pub trait WarningSink {
    /// Called when a timing line does not match `HH:MM:SS,mmm --> HH:MM:SS,mmm`. The line
    /// number is 1-based within the input stream.
    fn malformed_timing(&mut self, line_number: usize, line: &[u8]);
}

// The per-entry parsing cycle. A blank line resets to `ExpectMarker` from any state.
enum ParseState {
    ExpectMarker,
    ExpectTiming,
    CollectText,
}

/// Allows reading entries from a source.
pub trait ReadEntriesExt {
    /// Reads all entries from a source, reporting malformed timing lines to `sink`.
    fn read_entries(&mut self, sink: &mut dyn WarningSink) -> ReadResult<Vec<Entry>>;
}

impl<T> ReadEntriesExt for T where
    T: Read,
{

    fn read_entries(&mut self, sink: &mut dyn WarningSink) -> ReadResult<Vec<Entry>> {

        let mut input = Vec::new();

        self.read_to_end(&mut input)?;

        let mut entries = Vec::new();
        let mut current: Option<Entry> = None;
        let mut state = ParseState::ExpectMarker;

        for (index, line) in input.split(|byte| *byte == b'\n').enumerate() {

            let line = strip_carriage_return(line);

            if is_blank(line) {
                if let Some(entry) = current.take() {
                    entries.push(entry);
                }
                state = ParseState::ExpectMarker;
                continue
            }

            match state {
                ParseState::ExpectMarker => {
                    current = Some(
                        Entry {
                            marker: line.to_vec(),
                            timing: None,
                            text_lines: vec![],
                        }
                    );
                    state = ParseState::ExpectTiming;
                }
                ParseState::ExpectTiming => {
                    let timing = parse_timing(line);
                    if timing.is_none() {
                        sink.malformed_timing(index + 1, line);
                    }
                    if let Some(entry) = current.as_mut() {
                        entry.timing = timing;
                    }
                    state = ParseState::CollectText;
                }
                ParseState::CollectText => {
                    if let Some(entry) = current.as_mut() {
                        entry.text_lines.push(line.to_vec());
                    }
                }
            }
        }

        // Inputs without a trailing blank line still finalize their last entry.
        if let Some(entry) = current.take() {
            entries.push(entry);
        }

        Ok(entries)
    }
}

fn strip_carriage_return(line: &[u8]) -> &[u8] {
    match line.last() {
        Some(b'\r') => &line[..line.len() - 1],
        _ => line,
    }
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|byte| byte.is_ascii_whitespace())
}

fn parse_timing(line: &[u8]) -> Option<Timing> {

    let text = from_utf8(line).ok()?;
    let captures = TIMING_REGEX.captures(text.trim())?;

    Some(
        Timing {
            start: Timecode {
                hours: field(&captures, 1) as u8,
                minutes: field(&captures, 2) as u8,
                seconds: field(&captures, 3) as u8,
                milliseconds: field(&captures, 4),
            },
            end: Timecode {
                hours: field(&captures, 5) as u8,
                minutes: field(&captures, 6) as u8,
                seconds: field(&captures, 7) as u8,
                milliseconds: field(&captures, 8),
            },
        }
    )
}

// The pattern guarantees each group is two or three ASCII digits.
fn field(captures: &Captures<'_>, group: usize) -> u16 {
    captures[group].bytes().fold(0, |value, digit| value * 10 + (digit - b'0') as u16)
}
