// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paragraph layout engine.

pub(crate) mod alignment;
mod cursor;
pub(crate) mod line;
pub(crate) mod paint;
mod selection;

use alloc::vec::Vec;
use core::ops::Range;

use crate::analysis::shape_paragraph;
use crate::paragraph::{split_paragraphs, Paragraph};
use crate::{Coord, MetricsCache, ShapingBackend, TextRange, TextSource};

use self::line::{build_lines, LayoutLine, LineParams};
use self::paint::SelectionColors;
use self::selection::Selection;

pub use self::cursor::{GlyphCursor, TextCursor};
pub use self::line::LineMetrics;
pub use self::paint::{GlyphPainter, GlyphRunRef, PaintRun};
pub use self::selection::SelectionState;

/// Horizontal alignment of lines.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum Alignment {
    /// This is [`Alignment::Left`] for LTR text and [`Alignment::Right`] for RTL text.
    #[default]
    Start,
    /// This is [`Alignment::Right`] for LTR text and [`Alignment::Left`] for RTL text.
    End,
    /// Align content to the left edge.
    Left,
    /// Align each line centered within the container.
    Middle,
    /// Align content to the right edge.
    Right,
    /// Justify each line by spacing out content, except for the last line of a paragraph.
    ///
    /// Only wrapped text is justified: without word wrap, or in single line mode, every
    /// line is the last of its paragraph and keeps its natural width.
    Justified,
}

/// Options controlling line composition.
///
/// Right-to-left paragraphs are right aligned unless the alignment is
/// [`Alignment::Middle`] or [`Alignment::Justified`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Wrap lines at the layout width.
    pub word_wrap: bool,
    /// Treat the whole buffer as one paragraph and never wrap.
    pub single_line: bool,
    /// Line alignment.
    pub alignment: Alignment,
    /// Break inside a word when it does not fit on a line by itself.
    pub break_words: bool,
    /// Fill the background of text that has a background color.
    pub fill_background: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            word_wrap: true,
            single_line: false,
            alignment: Alignment::Start,
            break_words: false,
            fill_background: true,
        }
    }
}

impl LayoutOptions {
    /// Sets whether lines wrap at the layout width.
    #[must_use]
    pub fn with_word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    /// Sets single line mode.
    #[must_use]
    pub fn with_single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }

    /// Sets the line alignment.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets whether words wider than a line are broken.
    #[must_use]
    pub fn with_break_words(mut self, break_words: bool) -> Self {
        self.break_words = break_words;
        self
    }

    /// Sets whether backgrounds are filled.
    #[must_use]
    pub fn with_fill_background(mut self, fill_background: bool) -> Self {
        self.fill_background = fill_background;
        self
    }
}

/// A laid out text buffer.
///
/// The layout owns its buffer, its shaping backend and a metrics cache. Paragraphs, run
/// shapes, lines and paint runs are computed lazily by the queries that need them and are
/// kept until a change notification or an option change invalidates them. Every query takes
/// `&mut self` for that reason.
///
/// Coordinates passed to and returned from queries are relative to the top left corner of
/// the layout.
pub struct TextLayout<N, S, T>
where
    N: Coord,
    S: ShapingBackend<N>,
    T: TextSource<Style = S::Style>,
{
    text: T,
    backend: S,
    cache: MetricsCache<N, S::Style>,
    options: LayoutOptions,
    width: N,
    paragraphs: Vec<Paragraph<N, S::Style, T::Brush>>,
    paragraphs_valid: bool,
    selection: Selection,
    selection_colors: SelectionColors<T::Brush>,
    next_version: u64,
}

impl<N, S, T> TextLayout<N, S, T>
where
    N: Coord,
    S: ShapingBackend<N>,
    T: TextSource<Style = S::Style>,
{
    /// Creates a layout of `text` with lines wrapped at `width`.
    pub fn new(text: T, backend: S, width: N) -> Self {
        Self::with_cache(text, backend, MetricsCache::new(), width)
    }

    /// Creates a layout that uses an existing metrics cache.
    pub fn with_cache(text: T, backend: S, cache: MetricsCache<N, S::Style>, width: N) -> Self {
        Self {
            text,
            backend,
            cache,
            options: LayoutOptions::default(),
            width,
            paragraphs: Vec::new(),
            paragraphs_valid: false,
            selection: Selection::default(),
            selection_colors: SelectionColors::default(),
            next_version: 1,
        }
    }

    /// Consumes the layout and returns the buffer, the backend and the metrics cache.
    pub fn into_parts(self) -> (T, S, MetricsCache<N, S::Style>) {
        (self.text, self.backend, self.cache)
    }

    /// The text buffer.
    pub fn text(&self) -> &T {
        &self.text
    }

    /// Mutable access to the text buffer.
    ///
    /// The layout is not told about the mutation; follow it with
    /// [`on_text_modified`](Self::on_text_modified),
    /// [`on_text_replaced`](Self::on_text_replaced),
    /// [`on_style_changed`](Self::on_style_changed) or
    /// [`on_color_changed`](Self::on_color_changed).
    pub fn text_mut(&mut self) -> &mut T {
        &mut self.text
    }

    /// The shaping backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Mutable access to the shaping backend.
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// The metrics cache.
    pub fn cache(&self) -> &MetricsCache<N, S::Style> {
        &self.cache
    }

    /// The current options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Replaces all options, invalidating whatever they affect.
    pub fn set_options(&mut self, options: LayoutOptions) {
        if options.single_line != self.options.single_line {
            self.paragraphs_valid = false;
            self.selection.clear();
        } else if options.word_wrap != self.options.word_wrap
            || options.alignment != self.options.alignment
            || options.break_words != self.options.break_words
        {
            self.invalidate_lines();
        } else if options.fill_background != self.options.fill_background {
            self.reset_paint_runs();
        }
        self.options = options;
    }

    /// Sets the line alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.set_options(self.options.with_alignment(alignment));
    }

    /// Enables or disables word wrapping.
    pub fn set_word_wrap(&mut self, word_wrap: bool) {
        self.set_options(self.options.with_word_wrap(word_wrap));
    }

    /// Enables or disables breaking inside words wider than a line.
    pub fn set_break_words(&mut self, break_words: bool) {
        self.set_options(self.options.with_break_words(break_words));
    }

    /// Enables or disables single line mode.
    pub fn set_single_line(&mut self, single_line: bool) {
        self.set_options(self.options.with_single_line(single_line));
    }

    /// Enables or disables background filling.
    pub fn set_fill_background(&mut self, fill_background: bool) {
        self.set_options(self.options.with_fill_background(fill_background));
    }

    /// The width lines are wrapped and aligned in.
    pub fn width(&self) -> N {
        self.width
    }

    /// Changes the layout width. Line breaking is redone on the next query; shaping is kept.
    pub fn resize(&mut self, width: N) {
        if width == self.width {
            return;
        }
        log::debug!("layout resized from {:?} to {width:?}", self.width);
        self.width = width;
        self.invalidate_lines();
    }

    /// Rebuilds the layout from scratch after an arbitrary change to the buffer.
    ///
    /// The selection is cleared.
    pub fn on_text_modified(&mut self) {
        log::debug!("text modified; rebuilding all paragraphs");
        self.paragraphs_valid = false;
        self.paragraphs.clear();
        self.selection.clear();
    }

    /// Updates the layout after `old_range` of the previous text was replaced by `new_len`
    /// bytes.
    ///
    /// Paragraphs that end before the edit keep everything computed for them. Paragraphs
    /// that start after it are moved and keep their shapes and lines as well. The selection
    /// is cleared.
    pub fn on_text_replaced(&mut self, old_range: TextRange, new_len: usize) {
        self.selection.clear();
        if !self.paragraphs_valid || self.options.single_line {
            self.on_text_modified();
            return;
        }
        let new_ranges = split_paragraphs(self.text.text(), false);
        let delta = new_len as isize - old_range.length() as isize;
        let old = core::mem::take(&mut self.paragraphs);
        let keep_before = old
            .iter()
            .take_while(|paragraph| paragraph.range.end() < old_range.pos())
            .count();
        let keep_after = old
            .iter()
            .rev()
            .take_while(|paragraph| paragraph.range.pos() > old_range.end())
            .count()
            .min(old.len() - keep_before);
        let after_start = old.len() - keep_after;
        let mut before = Vec::with_capacity(keep_before);
        let mut after = Vec::with_capacity(keep_after);
        for (index, mut paragraph) in old.into_iter().enumerate() {
            paragraph.selection = None;
            paragraph.reset_paint_runs();
            if index < keep_before {
                before.push(Some(paragraph));
            } else if index >= after_start {
                paragraph.shift(delta);
                after.push(Some(paragraph));
            }
        }

        let new_count = new_ranges.len();
        let mut reused = 0;
        self.paragraphs = new_ranges
            .into_iter()
            .enumerate()
            .map(|(index, range)| {
                let from_end = new_count - index;
                let slot = if index < before.len() {
                    before.get_mut(index)
                } else if from_end <= after.len() {
                    let after_index = after.len() - from_end;
                    after.get_mut(after_index)
                } else {
                    None
                };
                match slot.and_then(Option::take) {
                    Some(paragraph) if paragraph.range == range => {
                        reused += 1;
                        paragraph
                    }
                    _ => Paragraph::new(range),
                }
            })
            .collect();
        log::debug!(
            "text replaced at {:?}; reused {reused} of {new_count} paragraphs",
            old_range.as_range(),
        );
    }

    /// Invalidates the paragraphs overlapping `range` after a style change.
    ///
    /// The selection is kept; it is re-anchored by glyph offset once the paragraphs are
    /// shaped again.
    pub fn on_style_changed(&mut self, range: TextRange) {
        self.invalidate_overlapping(range);
    }

    /// Invalidates the paragraphs overlapping `range` after a text or background color change.
    pub fn on_color_changed(&mut self, range: TextRange) {
        self.invalidate_overlapping(range);
    }

    fn invalidate_overlapping(&mut self, range: TextRange) {
        if !self.paragraphs_valid {
            return;
        }
        self.selection.mark_stale();
        for paragraph in &mut self.paragraphs {
            paragraph.selection = None;
            paragraph.reset_paint_runs();
            if paragraph.range.overlaps(range) {
                log::trace!("invalidating paragraph {:?}", paragraph.range.as_range());
                paragraph.invalidate_shaping();
            }
        }
    }

    fn invalidate_lines(&mut self) {
        for paragraph in &mut self.paragraphs {
            paragraph.invalidate_lines();
        }
    }

    fn reset_paint_runs(&mut self) {
        for paragraph in &mut self.paragraphs {
            paragraph.reset_paint_runs();
        }
    }

    /// Number of paragraphs in the layout.
    pub fn paragraph_count(&mut self) -> usize {
        self.ensure_paragraphs();
        self.paragraphs.len()
    }

    /// Text range of a paragraph, without its separator.
    pub fn paragraph_range(&mut self, index: usize) -> Option<TextRange> {
        self.ensure_paragraphs();
        self.paragraphs.get(index).map(|paragraph| paragraph.range)
    }

    /// Returns a counter that changes every time the lines of the paragraph are rebuilt.
    ///
    /// Lines are built on demand, so this does not trigger line breaking; it is `0` for a
    /// paragraph whose lines were never built.
    pub fn paragraph_version(&self, index: usize) -> Option<u64> {
        if !self.paragraphs_valid {
            return None;
        }
        self.paragraphs.get(index).map(|paragraph| paragraph.version)
    }

    /// Returns `true` if the paragraph is right-to-left.
    pub fn is_paragraph_rtl(&mut self, index: usize) -> bool {
        self.ensure_lines();
        self.paragraphs
            .get(index)
            .is_some_and(|paragraph| paragraph.is_rtl)
    }

    /// Width of the widest line.
    pub fn content_width(&mut self) -> N {
        self.ensure_lines();
        self.lines()
            .map(|(_, line)| line.width)
            .fold(N::ZERO, N::max_of)
    }

    /// Total height of all lines.
    pub fn content_height(&mut self) -> N {
        self.ensure_lines();
        self.lines().map(|(_, line)| line.height).sum()
    }

    /// Height the content would have if the layout were `width` wide.
    ///
    /// The current lines are left untouched.
    pub fn height_for_width(&mut self, width: N) -> N {
        self.ensure_shaped();
        let params = self.line_params(width);
        let mut height = N::ZERO;
        for paragraph in &self.paragraphs {
            let lines = build_lines(paragraph, &mut self.backend, &mut self.cache, params);
            height += lines.iter().map(|line| line.height).sum::<N>();
        }
        height
    }

    /// Number of lines in the layout.
    pub fn line_count(&mut self) -> usize {
        self.ensure_lines();
        self.lines().count()
    }

    /// Metrics of a line, or `None` if `line_index` is out of bounds.
    pub fn line_metrics(&mut self, line_index: usize) -> Option<LineMetrics<N>> {
        self.ensure_lines();
        let mut top = N::ZERO;
        for (index, (paragraph, line)) in self.lines().enumerate() {
            if index == line_index {
                let paragraph = &self.paragraphs[paragraph];
                let text = line_text_range(paragraph, line);
                return Some(LineMetrics {
                    text_begin: text.start,
                    text_end: text.end,
                    top,
                    x: line.x,
                    width: line.width,
                    trailing_whitespace: line.hang,
                    height: line.height,
                    ascent: line.max_ascent,
                });
            }
            top += line.height;
        }
        None
    }

    /// Returns the text offset where the content of a line stops fitting in `max_width`.
    ///
    /// Glyphs are measured in run order from the start of the line. When the whole line
    /// fits, the end of its text is returned. Out of range lines return the text length.
    pub fn line_fit_pos(&mut self, line_index: usize, max_width: N) -> usize {
        self.ensure_lines();
        let Some((paragraph, line)) = self.lines().nth(line_index) else {
            return self.text.len();
        };
        let paragraph = &self.paragraphs[paragraph];
        let mut x = N::ZERO;
        let mut flat = 0;
        for (run_index, glyphs) in line.glyph_spans(paragraph) {
            let cache = &paragraph.caches[run_index];
            let advance = |glyph: usize| line.advance(cache, glyph, flat + glyph - glyphs.start);
            for glyph in glyphs.clone() {
                if cache.is_cluster_start(glyph) {
                    let cluster: N = (glyph..glyphs.end)
                        .take_while(|&g| g == glyph || !cache.is_cluster_start(g))
                        .map(advance)
                        .sum();
                    if x + cluster > max_width {
                        return paragraph.span_text_range(run_index, glyph..glyph).start;
                    }
                }
                x += advance(glyph);
            }
            flat += glyphs.len();
        }
        line_text_range(paragraph, line).end
    }

    /// The paint runs of a line in visual order.
    pub fn line_paint_runs(&mut self, line_index: usize) -> &[PaintRun<N, T::Brush>] {
        self.ensure_lines();
        let Some((paragraph, line)) = self.line_location(line_index) else {
            return &[];
        };
        self.ensure_paint_runs(paragraph, line);
        self.paragraphs[paragraph].lines[line]
            .paint_runs
            .as_deref()
            .unwrap_or_default()
    }

    fn line_params(&self, width: N) -> LineParams<N> {
        LineParams {
            width,
            wrap: self.options.word_wrap && !self.options.single_line,
            alignment: self.options.alignment,
            break_words: self.options.break_words,
        }
    }

    fn ensure_paragraphs(&mut self) {
        if self.paragraphs_valid {
            return;
        }
        self.paragraphs = split_paragraphs(self.text.text(), self.options.single_line)
            .into_iter()
            .map(Paragraph::new)
            .collect();
        self.paragraphs_valid = true;
        log::debug!("built {} paragraphs", self.paragraphs.len());
    }

    fn ensure_shaped(&mut self) {
        self.ensure_paragraphs();
        for paragraph in &mut self.paragraphs {
            shape_paragraph(paragraph, &self.text, &mut self.backend);
        }
    }

    fn ensure_lines(&mut self) {
        self.ensure_shaped();
        let params = self.line_params(self.width);
        for paragraph in &mut self.paragraphs {
            if !paragraph.needs_lines() {
                continue;
            }
            paragraph.lines = build_lines(paragraph, &mut self.backend, &mut self.cache, params);
            paragraph.version = self.next_version;
            self.next_version += 1;
            log::trace!(
                "broke paragraph {:?} into {} lines",
                paragraph.range.as_range(),
                paragraph.lines.len()
            );
        }
        self.ensure_selection();
    }

    /// All lines in layout order with the index of their paragraph.
    fn lines(&self) -> impl Iterator<Item = (usize, &LayoutLine<N, T::Brush>)> + '_ {
        self.paragraphs
            .iter()
            .enumerate()
            .flat_map(|(index, paragraph)| paragraph.lines.iter().map(move |line| (index, line)))
    }

    /// Paragraph and paragraph-local line index of a layout line.
    fn line_location(&self, line_index: usize) -> Option<(usize, usize)> {
        let mut remaining = line_index;
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            if remaining < paragraph.lines.len() {
                return Some((index, remaining));
            }
            remaining -= paragraph.lines.len();
        }
        None
    }
}

impl<N, S, T> core::fmt::Debug for TextLayout<N, S, T>
where
    N: Coord,
    S: ShapingBackend<N>,
    T: TextSource<Style = S::Style>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextLayout")
            .field("width", &self.width)
            .field("options", &self.options)
            .field("paragraphs", &self.paragraphs.len())
            .field("selection", &self.selection.state())
            .finish_non_exhaustive()
    }
}

/// Text covered by a line, including its hanging space.
fn line_text_range<N: Coord, S, B>(
    paragraph: &Paragraph<N, S, B>,
    line: &LayoutLine<N, B>,
) -> Range<usize> {
    line.glyph_spans(paragraph)
        .into_iter()
        .filter(|(run_index, glyphs)| {
            !glyphs.is_empty() || paragraph.glyph_count(*run_index) == 0
        })
        .map(|(run_index, glyphs)| paragraph.span_text_range(run_index, glyphs))
        .reduce(|a, b| a.start.min(b.start)..a.end.max(b.end))
        .unwrap_or_else(|| {
            let pos = paragraph.text_offset(line.begin);
            pos..pos
        })
}
