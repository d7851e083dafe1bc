// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `linework`.
//!
//! - The `util` module contains shared utility functions that are needed by different
//!   test methods.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that the shared utilities are compiled once.
//! - If your test can be classified to a clear "topic" (e.g. cursor, selection, etc.), put
//!   it into the corresponding module. Tests that don't fit anywhere go into `basic.rs`.
//! - Put the topic of the test at the start of its name: `cursor_below_layout` rather than
//!   `below_layout_cursor`.
//!
//! Every test uses the monospaced backend from `linework_dev`: with the default style each
//! character is 10 units wide and each line 20 units high with an ascent of 16.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod basic;
mod draw;
mod invalidation;
mod justify;
mod selection;
mod util;
