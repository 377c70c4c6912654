/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: OSL-3.0
 */

use super::Entry;
use std::io::{Error as IoError, Write};
use thiserror::Error as ThisError;

/// A specialized [`Result`](std::result::Result) type for entry-writing operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// The error type for [WriteEntriesExt].
///
/// Errors are caused by either invalid state or by an underlying I/O error.
#[derive(ThisError, Debug)]
pub enum WriteError {
    /// The [`Entry`] could not be written because of an underlying I/O error.
    #[error("entry IO error")]
    IoError {
        /// The underlying I/O error.
        #[from]
        source: IoError,
    },
    /// The [`Entry`] at the given 1-based position has no timing. Emitting an entry without
    /// its timing line would corrupt the stream, so the whole write fails instead.
    #[error("missing timing for entry at position {position}")]
    MissingTiming {
        position: usize,
    },
}

/// Allows writing entries to a destination.
pub trait WriteEntriesExt {
    /// Writes all entries to a destination in sequence order, terminating every line with
    /// CRLF and separating entries with exactly one blank line.
    fn write_entries(&mut self, entries: &[Entry]) -> WriteResult<()>;
}

impl<T> WriteEntriesExt for T where
    T: Write,
{

    fn write_entries(&mut self, entries: &[Entry]) -> WriteResult<()> {

        for (index, entry) in entries.iter().enumerate() {

            let timing = match &entry.timing {
                Some(timing) => timing,
                None => return Err(WriteError::MissingTiming { position: index + 1 }),
            };

            self.write_all(&entry.marker)?;
            self.write_all(b"\r\n")?;
            write!(self, "{} --> {}\r\n", timing.start, timing.end)?;

            for line in entry.text_lines.iter() {
                self.write_all(line)?;
                self.write_all(b"\r\n")?;
            }

            self.write_all(b"\r\n")?;
        }

        Ok(())
    }
}
