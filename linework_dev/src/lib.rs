// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Linework Dev
//!
//! This crate provides utilities for developing Linework: a deterministic monospaced
//! shaping backend, a styled text buffer, a painter that records what it is asked to draw,
//! and text samples.

mod backend;
mod text;

use linework::{
    Coord, GlyphId, GlyphOffset, GlyphPainter, GlyphRunRef, InlineObjectId, TextLayout,
};

pub use crate::backend::MonoBackend;
pub use crate::text::{Color, StyledText, TextStyle, OBJECT_REPLACEMENT};

/// A layout over the development backend and buffer.
pub type MonoLayout<N> = TextLayout<N, MonoBackend, StyledText>;

/// Creates a layout of `text` with the default options.
pub fn layout<N: Coord>(text: StyledText, width: N) -> MonoLayout<N> {
    TextLayout::new(text, MonoBackend::new(), width)
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect<N> {
    /// Left edge.
    pub x0: N,
    /// Top edge.
    pub y0: N,
    /// Right edge.
    pub x1: N,
    /// Bottom edge.
    pub y1: N,
}

impl<N: Coord> Rect<N> {
    /// Creates a rectangle from two corners.
    pub fn new(x0: N, y0: N, x1: N, y1: N) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Horizontal extent.
    pub fn width(&self) -> N {
        self.x1 - self.x0
    }

    /// Vertical extent.
    pub fn height(&self) -> N {
        self.y1 - self.y0
    }
}

/// One paint run received by a [`RecordingPainter`].
#[derive(Clone, Debug, PartialEq)]
pub struct PaintedRun<N> {
    /// Left edge.
    pub x: N,
    /// Top of the line.
    pub top: N,
    /// Baseline position.
    pub baseline: N,
    /// Total advance.
    pub width: N,
    /// Glyph identifiers, in logical order.
    pub glyphs: Vec<GlyphId>,
    /// Effective advances.
    pub advances: Vec<N>,
    /// Glyph offsets, empty when the glyphs were not positioned.
    pub offsets: Vec<GlyphOffset<N>>,
    /// Whether the glyphs run right to left.
    pub is_rtl: bool,
    /// The inline object drawn instead of the glyphs.
    pub inline_object: Option<InlineObjectId>,
    /// Byte range of the text.
    pub text_range: std::ops::Range<usize>,
    /// Color of the glyphs.
    pub text_color: Color,
    /// Background color.
    pub background_color: Option<Color>,
    /// Whether the background was to be filled.
    pub fill_background: bool,
    /// Whether the glyphs were selected.
    pub selected: bool,
}

impl<N> PaintedRun<N> {
    /// The glyphs as text, in logical order. Every glyph of [`MonoBackend`] is the code point
    /// it was shaped from.
    pub fn text(&self) -> String {
        self.glyphs.iter().filter_map(|&g| char::from_u32(g)).collect()
    }
}

/// A painter that records every paint run, in drawing order.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter<N> {
    /// The runs painted so far.
    pub runs: Vec<PaintedRun<N>>,
}

impl<N: Coord> GlyphPainter<N, Color> for RecordingPainter<N> {
    fn paint_run(&mut self, run: &GlyphRunRef<'_, N, Color>) {
        self.runs.push(PaintedRun {
            x: run.x,
            top: run.top,
            baseline: run.baseline,
            width: run.width,
            glyphs: run.glyphs.to_vec(),
            advances: run.advances.to_vec(),
            offsets: run.offsets.to_vec(),
            is_rtl: run.is_rtl,
            inline_object: run.inline_object,
            text_range: run.text_range.clone(),
            text_color: *run.text_color,
            background_color: run.background_color.copied(),
            fill_background: run.fill_background,
            selected: run.selected,
        });
    }
}

/// A sample to be used for development.
#[derive(Debug)]
pub struct Sample {
    /// The name of the sample.
    pub name: &'static str,
    /// The text of the sample.
    pub text: &'static str,
}

/// A collection of text samples.
#[derive(Debug)]
pub struct TextSamples {
    /// The Arabic text sample.
    pub arabic: Sample,
    /// The Latin text sample.
    pub latin: Sample,
    /// The Japanese text sample.
    pub japanese: Sample,
    /// Latin text with an embedded Hebrew phrase.
    pub mixed: Sample,
}

impl TextSamples {
    /// Creates the samples.
    pub fn new() -> Self {
        Self {
            arabic: Sample {
                name: "arabic",
                text: "\u{627}\u{644}\u{646}\u{635} \u{627}\u{644}\u{639}\u{631}\u{628}\u{64a} \
                       \u{62c}\u{645}\u{64a}\u{644}",
            },
            latin: Sample {
                name: "latin",
                text: "The quick brown fox jumps over the lazy dog.\n\
                       Pack my box with five dozen liquor jugs.",
            },
            japanese: Sample {
                name: "japanese",
                text: "\u{3044}\u{308d}\u{306f}\u{306b}\u{307b}\u{3078}\u{3068}\u{3061}\u{308a}",
            },
            mixed: Sample {
                name: "mixed",
                text: "He said \u{5e9}\u{5dc}\u{5d5}\u{5dd} \u{5e2}\u{5d5}\u{5dc}\u{5dd} twice.",
            },
        }
    }
}

impl Default for TextSamples {
    fn default() -> Self {
        Self::new()
    }
}
