/*
 * SPDX-FileCopyrightText: 2021 William Swartzendruber <wswartzendruber@gmail.com>
 *
 * SPDX-License-Identifier: OSL-3.0
 */

//! Processes SRT subtitle streams.
//!
//! The [entry] module defines the data model along with reading and writing, while the
//! [shift] module retimes parsed entries by a fixed offset.

pub mod entry;
pub mod shift;
