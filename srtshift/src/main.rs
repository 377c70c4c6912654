/*
 * Copyright 2021 William Swartzendruber
 *
 * This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a
 * copy of the MPL was not distributed with this file, You can obtain one at
 * https://mozilla.org/MPL/2.0/.
 *
 * SPDX-License-Identifier: MPL-2.0
 */

use srt::{
    entry::{ReadEntriesExt, WarningSink, WriteEntriesExt},
    shift::{shift_entries, Offset},
};
use std::{
    fs::File,
    io::{stdout, BufReader, Write},
    process::exit,
};
use clap::{app_from_crate, crate_authors, crate_description, crate_name, crate_version, Arg};
use env_logger::Env;
use log::{error, warn};

struct LogWarningSink;

impl WarningSink for LogWarningSink {
    fn malformed_timing(&mut self, line_number: usize, line: &[u8]) {
        warn!(
            "failed to parse timing line {}: {}",
            line_number,
            String::from_utf8_lossy(line),
        );
    }
}

fn main() {

    // Malformed-timing diagnostics are warnings; they must reach stderr even when RUST_LOG
    // is unset.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let matches = app_from_crate!()
        .arg(Arg::with_name("output")
            .long("output")
            .short("o")
            .value_name("OUTPUT-FILE")
            .help("Output SRT file, overwritten whole; defaults to STDOUT")
            .takes_value(true)
            .required(false)
        )
        .arg(Arg::with_name("shift")
            .long("shift")
            .short("s")
            .value_name("SECONDS")
            .help("Signed shift in seconds, truncated to millisecond precision")
            .takes_value(true)
            .required(false)
            .default_value("0.0")
            .validator(|value| {
                if Offset::from_decimal_str(&value).is_ok() {
                    Ok(())
                } else {
                    Err("must be a signed decimal number of seconds".to_string())
                }
            })
        )
        .arg(Arg::with_name("input")
            .index(1)
            .value_name("INPUT-FILE")
            .help("Input SRT file")
            .required(true)
        )
        .after_help(format!("This utility will shift every timing in an SRT subtitle file \
            by a fixed offset, leaving the sequence markers and caption text untouched.\n\n\
            Copyright © 2021 William Swartzendruber\n\
            Licensed under the Mozilla Public License 2.0\n\
            <{}>", env!("CARGO_PKG_REPOSITORY")).as_str())
        .get_matches();
    let input_value = matches.value_of("input").unwrap();
    let shift_value = matches.value_of("shift").unwrap();
    let offset = match Offset::from_decimal_str(shift_value) {
        Ok(offset) => offset,
        Err(err) => {
            error!("Invalid shift amount {}: {}", shift_value, err);
            exit(1)
        }
    };
    let mut input = match File::open(input_value) {
        Ok(file) => BufReader::new(file),
        Err(err) => {
            error!("Unable to read file {}: {}", input_value, err);
            exit(1)
        }
    };
    let mut sink = LogWarningSink;
    let mut entries = match input.read_entries(&mut sink) {
        Ok(entries) => entries,
        Err(err) => {
            error!("Unable to read file {}: {}", input_value, err);
            exit(1)
        }
    };

    if let Err(err) = shift_entries(&mut entries, offset) {
        error!("Unable to shift entries: {}", err);
        exit(1)
    }

    // The output is built fully in memory so that a late failure never leaves a partially
    // written file behind.
    let mut buffer = vec![];

    if let Err(err) = buffer.write_entries(&entries) {
        error!("Unable to serialize entries: {}", err);
        exit(1)
    }

    let written = match matches.value_of("output") {
        Some(output_value) => {
            File::create(output_value).and_then(|mut file| file.write_all(&buffer))
        }
        None => stdout().write_all(&buffer),
    };

    if let Err(err) = written {
        error!("Unable to write output: {}", err);
        exit(1)
    }
}
