/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: CC0-1.0
 */

use super::*;
use crate::entry::{
    Entry,
    ReadEntriesExt,
    Timecode,
    Timing,
    WarningSink,
    WriteEntriesExt,
};
use std::io::Cursor;

struct DiscardWarnings;

impl WarningSink for DiscardWarnings {
    fn malformed_timing(&mut self, _line_number: usize, _line: &[u8]) {
    }
}

fn timed_entry(marker: &[u8], start_millis: i64, end_millis: i64) -> Entry {
    Entry {
        marker: marker.to_vec(),
        timing: Some(
            Timing {
                start: Timecode::from_total_millis(start_millis).unwrap(),
                end: Timecode::from_total_millis(end_millis).unwrap(),
            }
        ),
        text_lines: vec![b"text".to_vec()],
    }
}

#[test]
fn test_offset_integer_seconds() {
    assert_eq!(Offset::from_decimal_str("2").unwrap().total_millis(), 2_000);
}

#[test]
fn test_offset_zero() {
    assert_eq!(Offset::from_decimal_str("0.0").unwrap().total_millis(), 0);
}

#[test]
fn test_offset_truncates_sub_millisecond_digits() {
    assert_eq!(Offset::from_decimal_str("1.9999").unwrap().total_millis(), 1_999);
}

#[test]
fn test_offset_pads_short_fraction() {
    assert_eq!(Offset::from_decimal_str("0.5").unwrap().total_millis(), 500);
}

#[test]
fn test_offset_negative() {
    assert_eq!(Offset::from_decimal_str("-1.5").unwrap().total_millis(), -1_500);
}

#[test]
fn test_offset_negative_truncates_toward_magnitude() {
    assert_eq!(Offset::from_decimal_str("-1.9999").unwrap().total_millis(), -1_999);
}

#[test]
fn test_offset_leading_plus() {
    assert_eq!(Offset::from_decimal_str("+0.25").unwrap().total_millis(), 250);
}

#[test]
fn test_offset_spanning_hours() {
    assert_eq!(Offset::from_decimal_str("3661.001").unwrap().total_millis(), 3_661_001);
}

#[test]
fn test_offset_rejects_garbage() {
    assert!(Offset::from_decimal_str("abc").is_err());
    assert!(Offset::from_decimal_str("").is_err());
    assert!(Offset::from_decimal_str("-").is_err());
    assert!(Offset::from_decimal_str(".").is_err());
    assert!(Offset::from_decimal_str("1.2.3").is_err());
    assert!(Offset::from_decimal_str("1,5").is_err());
}

#[test]
fn test_offset_rejects_unrepresentable_seconds() {
    assert!(Offset::from_decimal_str("9223372036854775807").is_err());
    assert!(Offset::from_decimal_str("-9223372036854775807.999").is_err());
    assert!(Offset::from_decimal_str("99999999999999999999").is_err());
}

#[test]
fn test_shift_zero_is_identity() {

    let mut entries = vec![timed_entry(b"1", 1_000, 2_000)];
    let original = entries.clone();

    shift_entries(&mut entries, Offset::from_decimal_str("0.0").unwrap()).unwrap();

    assert_eq!(entries, original);
}

#[test]
fn test_shift_positive() {

    let mut entries = vec![timed_entry(b"1", 1_000, 2_000)];

    shift_entries(&mut entries, Offset::from_decimal_str("2.5").unwrap()).unwrap();

    let timing = entries[0].timing.unwrap();

    assert_eq!(timing.start.to_string(), "00:00:03,500");
    assert_eq!(timing.end.to_string(), "00:00:04,500");
}

#[test]
fn test_shift_negative_borrows_correctly() {

    let mut entries = vec![timed_entry(b"1", 2_000, 3_000)];

    shift_entries(&mut entries, Offset::from_decimal_str("-1.5").unwrap()).unwrap();

    let timing = entries[0].timing.unwrap();

    assert_eq!(timing.start.to_string(), "00:00:00,500");
    assert_eq!(timing.end.to_string(), "00:00:01,500");
}

#[test]
fn test_shift_sequential_matches_combined() {

    let mut sequential = vec![timed_entry(b"1", 60_000, 62_500)];
    let mut combined = sequential.clone();

    shift_entries(&mut sequential, Offset::from_decimal_str("1.75").unwrap()).unwrap();
    shift_entries(&mut sequential, Offset::from_decimal_str("1.5").unwrap()).unwrap();
    shift_entries(&mut combined, Offset::from_decimal_str("3.25").unwrap()).unwrap();

    assert_eq!(sequential, combined);
}

#[test]
fn test_shift_missing_timing_passes_through() {

    let mut entries = vec![
        timed_entry(b"1", 1_000, 2_000),
        Entry {
            marker: b"2".to_vec(),
            timing: None,
            text_lines: vec![],
        },
    ];

    shift_entries(&mut entries, Offset::from_decimal_str("1.0").unwrap()).unwrap();

    assert!(entries[0].timing.is_some());
    assert!(entries[1].timing.is_none());
}

#[test]
fn test_shift_below_zero_fails() {

    let mut entries = vec![timed_entry(b"1", 1_000, 2_000)];
    let result = shift_entries(&mut entries, Offset::from_decimal_str("-2").unwrap());

    assert!(matches!(result, Err(ShiftError::TimecodeOutOfRange { position: 1 })));
}

#[test]
fn test_shift_past_two_hour_digits_fails() {

    let mut entries = vec![timed_entry(b"1", 359_999_000, 359_999_999)];
    let result = shift_entries(&mut entries, Offset::from_decimal_str("1").unwrap());

    assert!(matches!(result, Err(ShiftError::TimecodeOutOfRange { position: 1 })));
}

#[test]
fn test_pipeline_end_to_end() {

    let input = b"1\n00:00:01,000 --> 00:00:02,000\nHello world\n\n";
    let mut sink = DiscardWarnings;
    let mut entries = Cursor::new(&input[..]).read_entries(&mut sink).unwrap();

    shift_entries(&mut entries, Offset::from_decimal_str("2.5").unwrap()).unwrap();

    let mut buffer = vec![];

    buffer.write_entries(&entries).unwrap();

    assert_eq!(
        buffer,
        b"1\r\n00:00:03,500 --> 00:00:04,500\r\nHello world\r\n\r\n".to_vec(),
    );
}
