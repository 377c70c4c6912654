/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: OSL-3.0
 */

//! Retimes subtitle entries by a fixed offset.

#[cfg(test)]
mod tests;

use crate::entry::{Entry, Timecode};
use thiserror::Error as ThisError;

/// A specialized [`Result`](std::result::Result) type for offset construction.
pub type OffsetResult<T> = Result<T, OffsetError>;

/// A specialized [`Result`](std::result::Result) type for shifting operations.
pub type ShiftResult<T> = Result<T, ShiftError>;

/// The error type for [`Offset::from_decimal_str`].
#[derive(ThisError, Debug)]
pub enum OffsetError {
    #[error("offset is not a signed decimal number of seconds")]
    InvalidNumber,
}

/// The error type for [shift_entries].
#[derive(ThisError, Debug)]
pub enum ShiftError {
    /// Shifting pushed a timecode below `00:00:00,000` or past two hour digits. No day
    /// rollover is defined for SRT streams, so the run aborts instead of wrapping.
    #[error("shifted timecode is out of range for entry at position {position}")]
    TimecodeOutOfRange {
        position: usize,
    },
}

/// A signed shift duration with millisecond resolution.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Offset {
    millis: i64,
}

impl Offset {

    /// Parses a signed decimal number of seconds, truncating (not rounding) anything past
    /// the third fractional digit.
    ///
    /// The text is decomposed directly instead of being routed through floating point, so
    /// the resulting millisecond count is exact. The magnitude is decomposed on its own and
    /// the sign applied to the composed duration, which keeps integer division away from
    /// negative partial fields.
    pub fn from_decimal_str(text: &str) -> OffsetResult<Self> {

        let text = text.trim();
        let (negative, magnitude) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (int_part, frac_part) = match magnitude.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (magnitude, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(OffsetError::InvalidNumber)
        }
        if !int_part.bytes().all(|byte| byte.is_ascii_digit())
            || !frac_part.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(OffsetError::InvalidNumber)
        }

        let mut seconds = 0i64;

        for digit in int_part.bytes() {
            seconds = seconds
                .checked_mul(10)
                .and_then(|value| value.checked_add((digit - b'0') as i64))
                .ok_or(OffsetError::InvalidNumber)?;
        }

        let mut frac_millis = 0i64;

        for digit in frac_part.bytes().take(3) {
            frac_millis = frac_millis * 10 + (digit - b'0') as i64;
        }
        for _ in frac_part.len().min(3)..3 {
            frac_millis *= 10;
        }

        let hours = seconds / 3_600;
        let minutes = seconds % 3_600 / 60;
        let remainder = seconds % 60;
        let magnitude_millis = (hours * 3_600 + minutes * 60 + remainder)
            .checked_mul(1_000)
            .and_then(|value| value.checked_add(frac_millis))
            .ok_or(OffsetError::InvalidNumber)?;

        Ok(
            Self {
                millis: if negative { -magnitude_millis } else { magnitude_millis },
            }
        )
    }

    /// The shift as a signed millisecond count.
    pub fn total_millis(&self) -> i64 {
        self.millis
    }
}

/// Applies `offset` to the start and end timecodes of every timed entry, in place.
///
/// Entries whose timing failed to parse pass through untouched; the writer is the stage
/// that rejects them.
pub fn shift_entries(entries: &mut [Entry], offset: Offset) -> ShiftResult<()> {

    for (index, entry) in entries.iter_mut().enumerate() {

        let timing = match entry.timing.as_mut() {
            Some(timing) => timing,
            None => continue,
        };

        timing.start = shift_timecode(timing.start, offset)
            .ok_or(ShiftError::TimecodeOutOfRange { position: index + 1 })?;
        timing.end = shift_timecode(timing.end, offset)
            .ok_or(ShiftError::TimecodeOutOfRange { position: index + 1 })?;
    }

    Ok(())
}

fn shift_timecode(timecode: Timecode, offset: Offset) -> Option<Timecode> {
    Timecode::from_total_millis(timecode.total_millis() + offset.total_millis())
}
