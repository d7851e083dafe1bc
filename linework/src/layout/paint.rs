// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint runs and drawing.

use alloc::vec::Vec;
use core::ops::Range;

use super::line::LayoutLine;
use super::{TextCursor, TextLayout};
use crate::paragraph::Paragraph;
use crate::{
    Brush, ColorRun, Coord, GlyphId, GlyphOffset, InlineObjectId, ShapingBackend, TextSource,
};

/// A span of glyphs of one line sharing colors and selection state.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintRun<N, B> {
    pub(crate) width: N,
    pub(crate) run_index: usize,
    pub(crate) glyph_offset: usize,
    pub(crate) glyph_count: usize,
    pub(crate) text_color: B,
    pub(crate) background_color: Option<B>,
    pub(crate) fill_background: bool,
    pub(crate) selected: bool,
    /// Index of the first glyph in the line's justified advances, if the line is justified.
    pub(crate) justified_offset: Option<usize>,
}

impl<N: Coord, B> PaintRun<N, B> {
    /// Total advance of the glyphs.
    pub fn width(&self) -> N {
        self.width
    }

    /// Index of the text run in its paragraph, in visual order.
    pub fn run_index(&self) -> usize {
        self.run_index
    }

    /// Glyph range within the text run.
    pub fn glyph_range(&self) -> Range<usize> {
        self.glyph_offset..self.glyph_offset + self.glyph_count
    }

    /// Number of glyphs.
    pub fn glyph_count(&self) -> usize {
        self.glyph_count
    }

    /// Color of the glyphs.
    pub fn text_color(&self) -> &B {
        &self.text_color
    }

    /// Background color.
    pub fn background_color(&self) -> Option<&B> {
        self.background_color.as_ref()
    }

    /// Whether the background should be filled.
    pub fn fill_background(&self) -> bool {
        self.fill_background
    }

    /// Whether the glyphs are selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Whether the line's justified advances apply to these glyphs.
    ///
    /// The hanging space of a justified line is painted as a run of its own with its natural
    /// advance, so this is `false` for it.
    pub fn is_justified(&self) -> bool {
        self.justified_offset.is_some()
    }
}

/// Colors used for selected text. `None` keeps the color of the text.
#[derive(Clone, Debug, Default)]
pub(crate) struct SelectionColors<B> {
    pub(crate) background: Option<B>,
    pub(crate) text: Option<B>,
}

/// Splits a line into paint runs, in visual order.
///
/// A paint run ends where the color run of the text changes or where the selection starts
/// or ends. Splits only happen at cluster starts.
pub(crate) fn build_paint_runs<N, S, T>(
    paragraph: &Paragraph<N, S, T::Brush>,
    line: &LayoutLine<N, T::Brush>,
    text: &T,
    colors: &SelectionColors<T::Brush>,
    fill_background: bool,
) -> Vec<PaintRun<N, T::Brush>>
where
    N: Coord,
    T: TextSource,
{
    let is_selected = |cursor: TextCursor| {
        paragraph
            .selection
            .is_some_and(|(begin, end)| begin <= cursor && cursor < end)
    };
    let mut paint_runs = Vec::new();
    let mut flat = 0;
    for (run_index, glyphs) in line.glyph_spans(paragraph) {
        let span_start = flat;
        flat += glyphs.len();
        if glyphs.is_empty() {
            continue;
        }
        let run = &paragraph.runs[run_index];
        let cache = &paragraph.caches[run_index];
        let advance = |glyph: usize| line.advance(cache, glyph, span_start + glyph - glyphs.start);
        let glyph_pos = |glyph: usize| paragraph.span_text_range(run_index, glyph..glyph).start;

        let piece = |start: usize, end: usize, color: &ColorRun<T::Brush>, selected: bool| {
            let (text_color, background_color, fill_background) =
                resolve_colors(color, selected, colors, fill_background);
            PaintRun {
                width: (start..end).map(advance).sum(),
                run_index,
                glyph_offset: start,
                glyph_count: end - start,
                text_color,
                background_color,
                fill_background,
                selected,
                justified_offset: (line.justify
                    && !line.is_hanging(TextCursor::new(run_index, start)))
                .then_some(span_start + start - glyphs.start),
            }
        };

        let mut pieces = Vec::new();
        let mut piece_start = glyphs.start;
        let mut color = text.color_run(glyph_pos(glyphs.start));
        let mut selected = is_selected(TextCursor::new(run_index, glyphs.start));
        for glyph in glyphs.start + 1..glyphs.end {
            if !cache.is_cluster_start(glyph) {
                continue;
            }
            let pos = glyph_pos(glyph);
            let color_changed = pos >= color.end;
            let cursor = TextCursor::new(run_index, glyph);
            let glyph_selected = is_selected(cursor);
            // A justified line paints its hanging space with the natural advance.
            let hang_starts = line.justify && line.skip_space && cursor == line.end;
            if color_changed || glyph_selected != selected || hang_starts {
                pieces.push(piece(piece_start, glyph, &color, selected));
                piece_start = glyph;
                if color_changed {
                    color = text.color_run(pos);
                }
                selected = glyph_selected;
            }
        }
        pieces.push(piece(piece_start, glyphs.end, &color, selected));
        if run.is_rtl() {
            pieces.reverse();
        }
        paint_runs.extend(pieces);
    }
    paint_runs
}

/// Selected text uses the selection colors where they are set and always fills its
/// background when it has one.
fn resolve_colors<B: Brush>(
    color: &ColorRun<B>,
    selected: bool,
    colors: &SelectionColors<B>,
    fill_background: bool,
) -> (B, Option<B>, bool) {
    if selected {
        let background = colors
            .background
            .clone()
            .or_else(|| color.background.clone());
        let fill = background.is_some();
        let text = colors.text.clone().unwrap_or_else(|| color.text.clone());
        (text, background, fill)
    } else {
        let fill = fill_background && color.background.is_some();
        (color.text.clone(), color.background.clone(), fill)
    }
}

/// Horizontal position of one glyph of a line.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GlyphBox<N> {
    pub(crate) cursor: TextCursor,
    /// Index of the paint run the glyph belongs to.
    pub(crate) paint_run: usize,
    pub(crate) x: N,
    pub(crate) advance: N,
    /// Text offset of the glyph's cluster.
    pub(crate) text_pos: usize,
}

/// Positions every glyph of a line from left to right.
pub(crate) fn glyph_boxes<N: Coord, S, B>(
    paragraph: &Paragraph<N, S, B>,
    line: &LayoutLine<N, B>,
    paint_runs: &[PaintRun<N, B>],
) -> Vec<GlyphBox<N>> {
    let mut boxes = Vec::new();
    let mut x = line.paint_x(paragraph.is_rtl);
    for (index, paint_run) in paint_runs.iter().enumerate() {
        let run = &paragraph.runs[paint_run.run_index];
        let cache = &paragraph.caches[paint_run.run_index];
        let advances = paint_run_advances(line, cache.advances(), paint_run);
        let mut push = |glyph: usize| {
            let advance = advances[glyph - paint_run.glyph_offset];
            boxes.push(GlyphBox {
                cursor: TextCursor::new(paint_run.run_index, glyph),
                paint_run: index,
                x,
                advance,
                text_pos: paragraph
                    .span_text_range(paint_run.run_index, glyph..glyph)
                    .start,
            });
            x += advance;
        };
        let glyphs = paint_run.glyph_offset..paint_run.glyph_offset + paint_run.glyph_count;
        if run.is_rtl() {
            glyphs.rev().for_each(&mut push);
        } else {
            glyphs.for_each(&mut push);
        }
    }
    boxes
}

fn paint_run_advances<'a, N: Coord, B>(
    line: &'a LayoutLine<N, B>,
    advances: &'a [N],
    paint_run: &PaintRun<N, B>,
) -> &'a [N] {
    match paint_run.justified_offset {
        Some(offset) => &line.justified_advances[offset..offset + paint_run.glyph_count],
        None => &advances[paint_run.glyph_range()],
    }
}

/// A paint run ready to be drawn.
///
/// Glyphs are in logical order. When `is_rtl` is set they are laid out from right to left,
/// the first glyph ending at `x + width`.
#[derive(Clone, Debug)]
pub struct GlyphRunRef<'a, N, B> {
    /// Left edge of the run.
    pub x: N,
    /// Top of the line.
    pub top: N,
    /// Height of the line.
    pub height: N,
    /// Baseline position.
    pub baseline: N,
    /// Total advance.
    pub width: N,
    /// Glyph identifiers.
    pub glyphs: &'a [GlyphId],
    /// Effective advances, including justification.
    pub advances: &'a [N],
    /// Glyph offsets. Empty when the backend does not position glyphs.
    pub offsets: &'a [GlyphOffset<N>],
    /// Whether the glyphs run right to left.
    pub is_rtl: bool,
    /// The inline object drawn in place of the glyphs, if any.
    pub inline_object: Option<InlineObjectId>,
    /// Text covered by the run.
    pub text_range: Range<usize>,
    /// Color of the glyphs.
    pub text_color: &'a B,
    /// Background color.
    pub background_color: Option<&'a B>,
    /// Whether the background should be filled.
    pub fill_background: bool,
    /// Whether the glyphs are selected.
    pub selected: bool,
}

/// Receives paint runs from [`TextLayout::draw`].
pub trait GlyphPainter<N, B> {
    /// Paints one run of glyphs.
    fn paint_run(&mut self, run: &GlyphRunRef<'_, N, B>);
}

impl<N, S, T> TextLayout<N, S, T>
where
    N: Coord,
    S: ShapingBackend<N>,
    T: TextSource<Style = S::Style>,
{
    /// Draws every line, in order, with the layout's top left corner at the origin.
    pub fn draw<P>(&mut self, origin_x: N, origin_y: N, painter: &mut P)
    where
        P: GlyphPainter<N, T::Brush>,
    {
        self.ensure_lines();
        let mut top = origin_y;
        for paragraph_index in 0..self.paragraphs.len() {
            for line_index in 0..self.paragraphs[paragraph_index].lines.len() {
                self.ensure_paint_runs(paragraph_index, line_index);
                let paragraph = &self.paragraphs[paragraph_index];
                let line = &paragraph.lines[line_index];
                let mut x = origin_x + line.paint_x(paragraph.is_rtl);
                for paint_run in line.paint_runs.as_deref().unwrap_or_default() {
                    let run = &paragraph.runs[paint_run.run_index];
                    let cache = &paragraph.caches[paint_run.run_index];
                    let glyphs = paint_run.glyph_range();
                    let offsets: &[GlyphOffset<N>] = if cache.offsets().is_empty() {
                        &[]
                    } else {
                        &cache.offsets()[glyphs.clone()]
                    };
                    let text_range =
                        paragraph.span_text_range(paint_run.run_index, glyphs.clone());
                    painter.paint_run(&GlyphRunRef {
                        x,
                        top,
                        height: line.height,
                        baseline: top + line.max_ascent,
                        width: paint_run.width,
                        glyphs: &cache.glyphs()[glyphs],
                        advances: paint_run_advances(line, cache.advances(), paint_run),
                        offsets,
                        is_rtl: run.is_rtl(),
                        inline_object: run.inline_object,
                        text_range,
                        text_color: &paint_run.text_color,
                        background_color: paint_run.background_color.as_ref(),
                        fill_background: paint_run.fill_background,
                        selected: paint_run.selected,
                    });
                    x += paint_run.width;
                }
                top += line.height;
            }
        }
    }

    /// Builds the paint runs of a line if they are missing.
    pub(crate) fn ensure_paint_runs(&mut self, paragraph_index: usize, line_index: usize) {
        let paragraph = &self.paragraphs[paragraph_index];
        let line = &paragraph.lines[line_index];
        if line.paint_runs.is_some() {
            return;
        }
        let paint_runs = build_paint_runs(
            paragraph,
            line,
            &self.text,
            &self.selection_colors,
            self.options.fill_background,
        );
        self.paragraphs[paragraph_index].lines[line_index].paint_runs = Some(paint_runs);
    }
}
