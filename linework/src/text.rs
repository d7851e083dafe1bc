// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The text buffer interface consumed by the layout engine.

use core::fmt::Debug;
use core::hash::Hash;
use core::ops::Range;

use crate::Error;

/// A half-open byte range into a text buffer, expressed as a start offset and a length.
///
/// Ranges produced by [`TextRange::new`] are validated against the text they were created
/// for: they are in bounds and both endpoints lie on UTF-8 character boundaries. It is the
/// caller's responsibility to only reuse a `TextRange` with the text it was validated for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    pos: usize,
    length: usize,
}

impl TextRange {
    /// Returns a validated `TextRange` covering `pos..pos + length` of `text`.
    pub fn new(text: &str, pos: usize, length: usize) -> Result<Self, Error> {
        let len = text.len();
        let Some(end) = pos.checked_add(length) else {
            return Err(Error::invalid_range(pos, usize::MAX, len));
        };
        if pos > len || end > len {
            return Err(Error::invalid_bounds(pos, end, len));
        }
        if !text.is_char_boundary(pos) || !text.is_char_boundary(end) {
            return Err(Error::not_on_char_boundary(pos, end, len));
        }
        Ok(Self { pos, length })
    }

    /// Returns a validated `TextRange` from a standard range.
    pub fn from_range(text: &str, range: Range<usize>) -> Result<Self, Error> {
        if range.start > range.end {
            return Err(Error::invalid_range(range.start, range.end, text.len()));
        }
        Self::new(text, range.start, range.end - range.start)
    }

    /// Creates a `TextRange` without validation.
    ///
    /// This is intended for callers that already maintain range invariants.
    #[must_use]
    #[inline]
    pub const fn new_unchecked(pos: usize, length: usize) -> Self {
        Self { pos, length }
    }

    /// The start byte offset.
    #[must_use]
    #[inline]
    pub const fn pos(self) -> usize {
        self.pos
    }

    /// The length of the range in bytes.
    #[must_use]
    #[inline]
    pub const fn length(self) -> usize {
        self.length
    }

    /// The end byte offset (exclusive).
    #[must_use]
    #[inline]
    pub const fn end(self) -> usize {
        self.pos + self.length
    }

    /// Returns `true` if the range covers no text.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.length == 0
    }

    /// Returns `true` if `offset` lies inside the range.
    #[must_use]
    pub const fn contains(self, offset: usize) -> bool {
        offset >= self.pos && offset < self.end()
    }

    /// Returns `true` if the two ranges share at least one byte, or if an empty range sits
    /// inside (or at the start of) `self`.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        if other.length == 0 {
            return other.pos >= self.pos && other.pos <= self.end();
        }
        if self.length == 0 {
            return self.pos >= other.pos && self.pos <= other.end();
        }
        self.pos < other.end() && other.pos < self.end()
    }

    /// Returns the range as a standard `Range<usize>`.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.pos..self.end()
    }

    /// Returns the range moved by `delta` bytes.
    #[must_use]
    pub(crate) fn shifted(self, delta: isize) -> Self {
        Self {
            pos: self.pos.saturating_add_signed(delta),
            length: self.length,
        }
    }
}

impl From<TextRange> for Range<usize> {
    fn from(range: TextRange) -> Self {
        range.as_range()
    }
}

/// A color that text or its background can be painted with.
pub trait Brush: Clone + PartialEq + Default + Debug {}

impl<T: Clone + PartialEq + Default + Debug> Brush for T {}

/// Stable index of an inline object in the arena owned by the text buffer.
///
/// The layout engine never owns inline objects; it refers to them by this index and asks
/// the shaping backend for their metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InlineObjectId(pub u32);

/// A maximal range of text sharing one text color and background color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRun<B: Brush> {
    /// Byte offset where the run ends (exclusive).
    pub end: usize,
    /// Color of the glyphs.
    pub text: B,
    /// Background color, if the range has one.
    pub background: Option<B>,
}

/// A styled text buffer, the model the layout is computed from.
///
/// Offsets are UTF-8 byte offsets into [`TextSource::text`].
pub trait TextSource {
    /// Style attached to ranges of text. Backends read it in
    /// [`ShapingBackend::analyse_rich_text`](crate::ShapingBackend::analyse_rich_text).
    type Style: Clone + Eq + Hash + Debug;

    /// The color type used for text and backgrounds.
    type Brush: Brush;

    /// The full text of the buffer.
    fn text(&self) -> &str;

    /// Returns the style at `pos` and the offset where that style ends.
    fn style_run(&self, pos: usize) -> (Self::Style, usize);

    /// Returns the color run containing `pos`.
    fn color_run(&self, pos: usize) -> ColorRun<Self::Brush>;

    /// Returns the inline object anchored at `pos`, if any.
    fn inline_object(&self, pos: usize) -> Option<InlineObjectId> {
        let _ = pos;
        None
    }

    /// The length of the text in bytes.
    fn len(&self) -> usize {
        self.text().len()
    }

    /// Returns `true` if the buffer holds no text.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
