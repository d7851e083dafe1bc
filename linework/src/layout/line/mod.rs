// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout lines and their construction.

pub(crate) mod greedy;

use alloc::vec::Vec;
use core::ops::Range;

use smallvec::SmallVec;

use crate::layout::alignment::{justify, resolve_alignment, ResolvedAlignment};
use crate::layout::paint::PaintRun;
use crate::layout::{Alignment, TextCursor};
use crate::paragraph::Paragraph;
use crate::{Coord, MetricsCache, RunCache, ShapingBackend};

use self::greedy::{BreakLines, LineBreak};

/// Glyph spans of a line: a run index and a glyph range within that run, in run order.
pub(crate) type GlyphSpans = SmallVec<[(usize, Range<usize>); 4]>;

/// A line of a paragraph.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LayoutLine<N, B> {
    pub(crate) begin: TextCursor,
    pub(crate) end: TextCursor,
    /// End of the glyphs drawn and hit tested on this line. Differs from `end` when a
    /// trailing space is skipped: the space hangs past the line width.
    pub(crate) paint_end: TextCursor,
    pub(crate) skip_space: bool,
    /// Natural width, or the layout width once justified.
    pub(crate) width: N,
    /// Width of the hanging space.
    pub(crate) hang: N,
    pub(crate) height: N,
    pub(crate) max_ascent: N,
    /// Offset of the line from the layout's left edge.
    pub(crate) x: N,
    pub(crate) justify: bool,
    /// Effective advances of the glyphs in [`Self::glyph_spans`] order, up to the hanging
    /// space. Only filled when `justify` is set; they sum to `width`.
    pub(crate) justified_advances: Vec<N>,
    pub(crate) paint_runs: Option<Vec<PaintRun<N, B>>>,
}

impl<N: Coord, B> LayoutLine<N, B> {
    /// The glyphs of the line, including a hanging space.
    pub(crate) fn glyph_spans<S>(&self, paragraph: &Paragraph<N, S, B>) -> GlyphSpans {
        let mut spans = GlyphSpans::new();
        let run_count = paragraph.runs.len();
        if run_count == 0 {
            return spans;
        }
        let last = if self.paint_end.run_offset > 0 {
            self.paint_end.run_index
        } else {
            self.paint_end.run_index.saturating_sub(1)
        }
        .min(run_count - 1);
        for run_index in self.begin.run_index..=last {
            let count = paragraph.glyph_count(run_index);
            let start = if run_index == self.begin.run_index {
                self.begin.run_offset.min(count)
            } else {
                0
            };
            let end = if run_index == self.paint_end.run_index {
                self.paint_end.run_offset.min(count)
            } else {
                count
            };
            spans.push((run_index, start..end.max(start)));
        }
        spans
    }

    /// Returns `true` if `cursor` is at or past the start of the hanging space.
    pub(crate) fn is_hanging(&self, cursor: TextCursor) -> bool {
        self.skip_space && self.end <= cursor
    }

    /// Advance of a glyph of a run: the justified one when the line is justified.
    ///
    /// `flat_index` is the index of the glyph among all glyphs of the line. The hanging
    /// space is never justified and keeps its natural advance.
    pub(crate) fn advance(&self, cache: &RunCache<N>, glyph: usize, flat_index: usize) -> N {
        match self.justified_advances.get(flat_index) {
            Some(&advance) if self.justify => advance,
            _ => cache.advances()[glyph],
        }
    }

    /// Left edge of the first glyph drawn. A hanging space of a right-to-left paragraph is
    /// drawn left of the aligned content.
    pub(crate) fn paint_x(&self, is_rtl: bool) -> N {
        if is_rtl {
            self.x - self.hang
        } else {
            self.x
        }
    }
}

/// Geometry and text extent of a line.
///
/// Lines are broken in visual run order. The text extent is the smallest range covering
/// the text of every run on the line, so when a wrapped paragraph mixes directions the
/// extents of consecutive lines may overlap and need not follow text order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineMetrics<N> {
    /// Byte offset of the first character on the line.
    pub text_begin: usize,
    /// Byte offset one past the last character on the line. A trailing space that the line
    /// broke at is counted as part of the line.
    pub text_end: usize,
    /// Offset of the line from the top of the layout.
    pub top: N,
    /// Offset of the line from the left edge of the layout.
    pub x: N,
    /// Width of the line content, excluding trailing whitespace.
    pub width: N,
    /// Width of the trailing space hanging past `width`.
    pub trailing_whitespace: N,
    /// Line height.
    pub height: N,
    /// Distance from the top of the line to the baseline.
    pub ascent: N,
}

/// Inputs for breaking a paragraph into lines.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LineParams<N> {
    /// The layout width lines are aligned in.
    pub(crate) width: N,
    /// Whether lines are wrapped at `width`.
    pub(crate) wrap: bool,
    pub(crate) alignment: Alignment,
    pub(crate) break_words: bool,
}

/// Breaks a shaped paragraph into lines, then measures, aligns and justifies them.
pub(crate) fn build_lines<N, S, B>(
    paragraph: &Paragraph<N, S::Style, B>,
    backend: &mut S,
    cache: &mut MetricsCache<N, S::Style>,
    params: LineParams<N>,
) -> Vec<LayoutLine<N, B>>
where
    N: Coord,
    S: ShapingBackend<N>,
{
    if paragraph.dropped {
        return Vec::new();
    }
    let max_advance = params.wrap.then_some(params.width);
    let breaks =
        BreakLines::new(&paragraph.caches, max_advance, params.break_words).break_remaining();
    let line_count = breaks.len();
    let alignment = resolve_alignment(params.alignment, paragraph.is_rtl);
    breaks
        .into_iter()
        .enumerate()
        .map(|(index, line_break)| {
            let mut line = new_line(paragraph, line_break);
            measure_line(paragraph, &mut line, backend, cache);
            let is_last = index + 1 == line_count;
            let justified = alignment == ResolvedAlignment::Justify
                && params.wrap
                && !is_last
                && line.width < params.width
                && justify(paragraph, &mut line, params.width, backend);
            line.x = if justified {
                N::ZERO
            } else {
                line_offset(alignment, paragraph.is_rtl, params.width, line.width)
            };
            line
        })
        .collect()
}

fn new_line<N: Coord, S, B>(
    paragraph: &Paragraph<N, S, B>,
    line_break: LineBreak<N>,
) -> LayoutLine<N, B> {
    let (paint_end, hang) = if line_break.skip_space {
        let end = line_break.end;
        let next = paragraph.next_cluster(end);
        let hang = paragraph
            .caches
            .get(end.run_index)
            .map(|cache| {
                let stop = if next.run_index == end.run_index {
                    next.run_offset
                } else {
                    cache.glyph_count()
                };
                cache.width_of(end.run_offset..stop)
            })
            .unwrap_or(N::ZERO);
        (next, hang)
    } else {
        (line_break.end, N::ZERO)
    };
    LayoutLine {
        begin: line_break.begin,
        end: line_break.end,
        paint_end,
        skip_space: line_break.skip_space,
        width: line_break.width,
        hang,
        height: N::ZERO,
        max_ascent: N::ZERO,
        x: N::ZERO,
        justify: false,
        justified_advances: Vec::new(),
        paint_runs: None,
    }
}

/// Computes height and ascent from the styles and inline objects on the line.
///
/// Text determines the baseline; an inline object sits on it and enlarges the ascent when it
/// is taller than the text above the baseline.
fn measure_line<N, S, B>(
    paragraph: &Paragraph<N, S::Style, B>,
    line: &mut LayoutLine<N, B>,
    backend: &mut S,
    cache: &mut MetricsCache<N, S::Style>,
) where
    N: Coord,
    S: ShapingBackend<N>,
{
    let mut line_height = N::ZERO;
    let mut ascent = N::ZERO;
    let mut descent = N::ZERO;
    let mut object_height = N::ZERO;
    let spans = line.glyph_spans(paragraph);
    for (run_index, _) in &spans {
        let run = &paragraph.runs[*run_index];
        if let Some(object) = run.inline_object {
            object_height = object_height.max_of(backend.inline_object_metrics(object).height);
            continue;
        }
        let metrics = cache.style_metrics(backend, &run.style);
        line_height = line_height.max_of(metrics.line_height);
        ascent = ascent.max_of(metrics.ascent);
        descent = descent.max_of(metrics.line_height - metrics.ascent);
    }
    line.max_ascent = ascent.max_of(object_height);
    line.height = line_height.max_of(line.max_ascent + descent);
}

/// Horizontal offset of a line that is not justified.
fn line_offset<N: Coord>(
    alignment: ResolvedAlignment,
    is_rtl: bool,
    width: N,
    line_width: N,
) -> N {
    let free = width - line_width;
    if free <= N::ZERO {
        return N::ZERO;
    }
    match alignment {
        ResolvedAlignment::Left => N::ZERO,
        ResolvedAlignment::Right => free,
        ResolvedAlignment::Center => free.half(),
        ResolvedAlignment::Justify if is_rtl => free,
        ResolvedAlignment::Justify => N::ZERO,
    }
}
