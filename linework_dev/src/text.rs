// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::ops::Range;

use linework::{ColorRun, Error, InlineObjectId, TextRange, TextSource};

/// An RGBA color packed into a `u32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Opaque black, the default text color.
    pub const BLACK: Self = Self(0x0000_00ff);
    /// Opaque white.
    pub const WHITE: Self = Self(0xffff_ffff);
    /// Opaque red.
    pub const RED: Self = Self(0xff00_00ff);
    /// Opaque blue.
    pub const BLUE: Self = Self(0x0000_ffff);
    /// Opaque yellow.
    pub const YELLOW: Self = Self(0xffff_00ff);
}

/// Style understood by [`MonoBackend`](crate::MonoBackend).
///
/// All metrics are in whole layout units so they convert exactly to any coordinate type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextStyle {
    /// Advance of every character.
    pub advance: u32,
    /// Distance between baselines.
    pub line_height: u32,
    /// Distance from the top of the line to the baseline.
    pub ascent: u32,
    /// Distinguishes otherwise identical styles, like a font weight would.
    pub weight: u16,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            advance: 10,
            line_height: 20,
            ascent: 16,
            weight: 400,
        }
    }
}

impl TextStyle {
    /// Returns a copy with a different advance.
    #[must_use]
    pub fn with_advance(mut self, advance: u32) -> Self {
        self.advance = advance;
        self
    }

    /// Returns a copy with different vertical metrics.
    #[must_use]
    pub fn with_line_height(mut self, line_height: u32, ascent: u32) -> Self {
        self.line_height = line_height;
        self.ascent = ascent;
        self
    }

    /// Returns a copy with a different weight.
    #[must_use]
    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }
}

/// Placeholder character anchoring an inline object in the text.
pub const OBJECT_REPLACEMENT: char = '\u{fffc}';

/// A text buffer with styles, colors and inline objects applied to ranges.
///
/// Spans are kept in the order they were applied; a later span wins where spans overlap.
#[derive(Clone, Debug, Default)]
pub struct StyledText {
    text: String,
    default_style: TextStyle,
    default_color: Color,
    styles: Vec<(Range<usize>, TextStyle)>,
    colors: Vec<(Range<usize>, Color)>,
    backgrounds: Vec<(Range<usize>, Color)>,
    objects: Vec<(usize, InlineObjectId)>,
}

impl StyledText {
    /// Creates a buffer with the default style and black text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            default_color: Color::BLACK,
            ..Self::default()
        }
    }

    /// Sets the style used where no span applies.
    #[must_use]
    pub fn with_default_style(mut self, style: TextStyle) -> Self {
        self.default_style = style;
        self
    }

    /// The text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Applies a style to a range.
    pub fn set_style(
        &mut self,
        range: Range<usize>,
        style: TextStyle,
    ) -> Result<TextRange, Error> {
        let range = TextRange::from_range(&self.text, range)?;
        self.styles.push((range.as_range(), style));
        Ok(range)
    }

    /// Applies a text color to a range.
    pub fn set_color(&mut self, range: Range<usize>, color: Color) -> Result<TextRange, Error> {
        let range = TextRange::from_range(&self.text, range)?;
        self.colors.push((range.as_range(), color));
        Ok(range)
    }

    /// Applies a background color to a range.
    pub fn set_background(
        &mut self,
        range: Range<usize>,
        color: Color,
    ) -> Result<TextRange, Error> {
        let range = TextRange::from_range(&self.text, range)?;
        self.backgrounds.push((range.as_range(), color));
        Ok(range)
    }

    /// Inserts an object placeholder at `pos` and anchors `object` to it.
    ///
    /// Returns the empty range at `pos` that was replaced, as expected by
    /// [`TextLayout::on_text_replaced`](linework::TextLayout::on_text_replaced).
    pub fn insert_object(
        &mut self,
        pos: usize,
        object: InlineObjectId,
    ) -> Result<TextRange, Error> {
        let at = TextRange::new(&self.text, pos, 0)?;
        let mut buf = [0; 4];
        self.replace(at, OBJECT_REPLACEMENT.encode_utf8(&mut buf))?;
        self.objects.push((pos, object));
        Ok(at)
    }

    /// Replaces `range` with `with`, moving every span and object after it.
    ///
    /// Spans that end inside the replaced range are cut at its start; objects inside it are
    /// removed.
    pub fn replace(&mut self, range: TextRange, with: &str) -> Result<(), Error> {
        let range = TextRange::new(&self.text, range.pos(), range.length())?;
        self.text.replace_range(range.as_range(), with);
        let map = |offset: usize| {
            if offset <= range.pos() {
                offset
            } else if offset >= range.end() {
                offset - range.length() + with.len()
            } else {
                range.pos()
            }
        };
        for spans in [&mut self.colors, &mut self.backgrounds] {
            for (span, _) in spans.iter_mut() {
                *span = map(span.start)..map(span.end);
            }
        }
        for (span, _) in &mut self.styles {
            *span = map(span.start)..map(span.end);
        }
        self.objects.retain(|(pos, _)| *pos < range.pos() || *pos >= range.end());
        for (pos, _) in &mut self.objects {
            if *pos >= range.end() {
                *pos = *pos - range.length() + with.len();
            }
        }
        Ok(())
    }

    fn value_at<V: Copy>(spans: &[(Range<usize>, V)], pos: usize) -> Option<V> {
        spans
            .iter()
            .rev()
            .find(|(range, _)| range.contains(&pos))
            .map(|(_, value)| *value)
    }

    /// The first span boundary after `pos`, or the text length.
    fn next_boundary<V>(&self, spans: &[&[(Range<usize>, V)]], pos: usize) -> usize {
        spans
            .iter()
            .flat_map(|spans| spans.iter())
            .flat_map(|(range, _)| [range.start, range.end])
            .filter(|&offset| offset > pos)
            .fold(self.text.len(), usize::min)
    }
}

impl TextSource for StyledText {
    type Style = TextStyle;
    type Brush = Color;

    fn text(&self) -> &str {
        &self.text
    }

    fn style_run(&self, pos: usize) -> (TextStyle, usize) {
        let style = Self::value_at(&self.styles, pos).unwrap_or(self.default_style);
        (style, self.next_boundary(&[self.styles.as_slice()], pos))
    }

    fn color_run(&self, pos: usize) -> ColorRun<Color> {
        let end = self.next_boundary(&[self.colors.as_slice(), self.backgrounds.as_slice()], pos);
        ColorRun {
            end,
            text: Self::value_at(&self.colors, pos).unwrap_or(self.default_color),
            background: Self::value_at(&self.backgrounds, pos),
        }
    }

    fn inline_object(&self, pos: usize) -> Option<InlineObjectId> {
        self.objects
            .iter()
            .find(|(at, _)| *at == pos)
            .map(|(_, object)| *object)
    }
}
