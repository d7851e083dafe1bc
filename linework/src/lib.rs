// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linework lays out paragraphs of styled text over glyphs produced by an external shaper.
//!
//! The engine does not shape text and does not paint. It asks a [`ShapingBackend`] for runs,
//! glyphs and metrics, then decides how the shaped runs are split into lines and how lines
//! map to and from positions and text offsets:
//!
//! - paragraphs are split at paragraph separators and analysed into runs in visual order,
//! - runs are broken into lines greedily at word-wrap opportunities,
//! - lines are aligned, and justified when requested,
//! - lines are cut into [`PaintRun`]s sharing colors and selection state,
//! - points are hit tested to cursors and cursors converted to text offsets,
//! - a selection is tracked across paragraphs.
//!
//! Everything is computed lazily by the queries of [`TextLayout`] and cached until a change
//! notification invalidates it. Edits and style changes invalidate only the paragraphs they
//! touch; width changes redo line breaking but keep shaping.
//!
//! Coordinates are generic over [`Coord`], so pixel-snapping backends can use `i32` while
//! resolution independent ones use `f32` or `f64`.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

mod analysis;
mod backend;
mod cache;
mod coord;
mod error;
mod paragraph;
mod text;

pub mod layout;

pub use crate::backend::{
    reorder_runs, GlyphId, GlyphOffset, InlineObjectMetrics, JustificationClass, LogicalAttr,
    RunCache, ShapingBackend, StyleMetrics, TextRun,
};
pub use crate::cache::MetricsCache;
pub use crate::coord::{Coord, Point};
pub use crate::error::{Error, ErrorKind};
pub use crate::layout::{
    Alignment, GlyphCursor, GlyphPainter, GlyphRunRef, LayoutOptions, LineMetrics, PaintRun,
    SelectionState, TextCursor, TextLayout,
};
pub use crate::paragraph::{is_paragraph_separator, split_paragraphs};
pub use crate::text::{Brush, ColorRun, InlineObjectId, TextRange, TextSource};
