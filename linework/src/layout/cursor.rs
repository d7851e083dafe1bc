// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursors, hit testing and text regions.

use alloc::vec::Vec;

use super::paint::{glyph_boxes, GlyphBox};
use super::TextLayout;
use crate::{Coord, ShapingBackend, TextSource};

/// A position inside a paragraph: the index of a run (in visual order) and a glyph offset
/// within that run's shaped output.
///
/// Cursors order lexicographically by run index, then glyph offset. The cursor with a run
/// index equal to the number of runs marks the end of the paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextCursor {
    /// Index of the run.
    pub run_index: usize,
    /// Glyph offset within the run.
    pub run_offset: usize,
}

impl TextCursor {
    /// Creates a cursor.
    pub const fn new(run_index: usize, run_offset: usize) -> Self {
        Self {
            run_index,
            run_offset,
        }
    }
}

/// A position unique across a whole layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphCursor {
    /// Index of the paragraph.
    pub paragraph: usize,
    /// Position within the paragraph.
    pub cursor: TextCursor,
}

impl GlyphCursor {
    /// Creates a cursor.
    pub const fn new(paragraph: usize, cursor: TextCursor) -> Self {
        Self { paragraph, cursor }
    }
}

/// A hit on a line.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LineHit {
    pub(crate) paragraph: usize,
    pub(crate) line: usize,
}

impl<N, S, T> TextLayout<N, S, T>
where
    N: Coord,
    S: ShapingBackend<N>,
    T: TextSource<Style = S::Style>,
{
    /// Returns the index of the line under a point.
    ///
    /// The point must lie within the vertical extent of the line and within the horizontal
    /// extent of its content, after alignment.
    pub fn line_from_point(&mut self, x: N, y: N) -> Option<usize> {
        self.ensure_lines();
        if y < N::ZERO {
            return None;
        }
        let hit = self.line_hit(y)?;
        let paragraph = &self.paragraphs[hit.paragraph];
        let line = &paragraph.lines[hit.line];
        let left = line.paint_x(paragraph.is_rtl);
        if x < left || x >= left + line.width + line.hang {
            return None;
        }
        let preceding: usize = self.paragraphs[..hit.paragraph]
            .iter()
            .map(|paragraph| paragraph.lines.len())
            .sum();
        Some(preceding + hit.line)
    }

    /// Returns `true` if a point lies on text.
    pub fn is_inside_text(&mut self, x: N, y: N) -> bool {
        self.line_from_point(x, y).is_some()
    }

    /// Returns the cursor of the cluster under a point.
    ///
    /// Points above the layout resolve to the first line and points below it to the last.
    /// Points left or right of a line resolve to its first or last glyph.
    pub fn cursor_from_point(&mut self, x: N, y: N) -> GlyphCursor {
        self.ensure_lines();
        let Some(hit) = self.line_hit(y).or_else(|| self.last_line_hit()) else {
            return GlyphCursor::default();
        };
        self.ensure_paint_runs(hit.paragraph, hit.line);
        let paragraph = &self.paragraphs[hit.paragraph];
        let line = &paragraph.lines[hit.line];
        let boxes = glyph_boxes(
            paragraph,
            line,
            line.paint_runs.as_deref().unwrap_or_default(),
        );
        let cursor = match hit_glyph(&boxes, x) {
            Some(glyph) => paragraph.cluster_start(glyph.cursor),
            None => line.begin,
        };
        GlyphCursor::new(hit.paragraph, cursor)
    }

    /// Returns the text offset of the cluster under a point.
    pub fn text_from_pos(&mut self, x: N, y: N) -> usize {
        let cursor = self.cursor_from_point(x, y);
        self.text_offset_from_cursor(cursor)
    }

    /// Converts a cursor to a text offset.
    ///
    /// Cursors past the end of their paragraph map to its end; cursors of unknown
    /// paragraphs map to the end of the text.
    pub fn text_offset_from_cursor(&mut self, cursor: GlyphCursor) -> usize {
        self.ensure_shaped();
        match self.paragraphs.get(cursor.paragraph) {
            Some(paragraph) => paragraph.text_offset(cursor.cursor),
            None => self.text.len(),
        }
    }

    /// Converts a cursor to a glyph offset within its paragraph: the number of glyphs of the
    /// paragraph before it.
    pub fn glyph_offset_from_cursor(&mut self, cursor: GlyphCursor) -> usize {
        self.ensure_shaped();
        self.paragraphs
            .get(cursor.paragraph)
            .map(|paragraph| paragraph.glyph_offset(cursor.cursor))
            .unwrap_or(0)
    }

    /// Converts a glyph offset within a paragraph back to a cursor.
    ///
    /// Offsets past the end of the paragraph clamp to its end.
    pub fn cursor_from_glyph_offset(
        &mut self,
        paragraph: usize,
        glyph_offset: usize,
    ) -> GlyphCursor {
        self.ensure_shaped();
        match self.paragraphs.get(paragraph) {
            Some(p) => GlyphCursor::new(paragraph, p.cursor_from_glyph_offset(glyph_offset)),
            None => self.end_cursor(),
        }
    }

    /// Returns the cursor of the cluster containing a text offset.
    ///
    /// An offset on a paragraph separator maps to the end of the paragraph it ends. Offsets
    /// past the end of the text map to the end of the last paragraph.
    pub fn cursor_from_text_offset(&mut self, pos: usize) -> GlyphCursor {
        self.ensure_shaped();
        let index = self
            .paragraphs
            .iter()
            .position(|paragraph| pos <= paragraph.range.end());
        match index {
            Some(index) => {
                let paragraph = &self.paragraphs[index];
                GlyphCursor::new(index, paragraph.cursor_from_text_offset(pos))
            }
            None => self.end_cursor(),
        }
    }

    /// Returns a region covering the glyphs of `text_length` bytes of text starting at
    /// `text_pos`, with the layout's top left corner at the origin.
    ///
    /// The region holds one rectangle for each contiguous span of glyphs within a paint run.
    /// Returns `None` for an empty range or a range without glyphs.
    pub fn text_region(
        &mut self,
        origin_x: N,
        origin_y: N,
        text_pos: usize,
        text_length: usize,
    ) -> Option<S::Region> {
        if text_length == 0 {
            return None;
        }
        self.ensure_lines();
        let range = text_pos..text_pos.saturating_add(text_length);
        let mut rects = Vec::new();
        let mut top = origin_y;
        for paragraph_index in 0..self.paragraphs.len() {
            for line_index in 0..self.paragraphs[paragraph_index].lines.len() {
                self.ensure_paint_runs(paragraph_index, line_index);
                let paragraph = &self.paragraphs[paragraph_index];
                let line = &paragraph.lines[line_index];
                let boxes = glyph_boxes(
                    paragraph,
                    line,
                    line.paint_runs.as_deref().unwrap_or_default(),
                );
                let mut span: Option<(usize, N, N)> = None;
                for glyph in boxes {
                    if !range.contains(&glyph.text_pos) {
                        continue;
                    }
                    let left = origin_x + glyph.x;
                    let right = left + glyph.advance;
                    span = match span {
                        Some((paint_run, x1, x2))
                            if paint_run == glyph.paint_run && x2 == left =>
                        {
                            Some((paint_run, x1, right))
                        }
                        Some((_, x1, x2)) => {
                            rects.push((x1, top, x2, top + line.height));
                            Some((glyph.paint_run, left, right))
                        }
                        None => Some((glyph.paint_run, left, right)),
                    };
                }
                if let Some((_, x1, x2)) = span {
                    rects.push((x1, top, x2, top + line.height));
                }
                top += line.height;
            }
        }
        let mut region: Option<S::Region> = None;
        for (x1, y1, x2, y2) in rects {
            let rect = self.backend.create_region_from_points(x1, y1, x2, y2);
            match region.as_mut() {
                Some(region) => self.backend.union_region(region, rect),
                None => region = Some(rect),
            }
        }
        region
    }

    /// The cursor at the end of the last paragraph.
    pub(crate) fn end_cursor(&self) -> GlyphCursor {
        match self.paragraphs.len().checked_sub(1) {
            Some(index) => GlyphCursor::new(index, self.paragraphs[index].end_cursor()),
            None => GlyphCursor::default(),
        }
    }

    /// Finds the line whose vertical extent contains `y`. Points above the layout hit the
    /// first line; `None` means the point is below all content.
    pub(crate) fn line_hit(&self, y: N) -> Option<LineHit> {
        let mut top = N::ZERO;
        for (paragraph_index, paragraph) in self.paragraphs.iter().enumerate() {
            for (line_index, line) in paragraph.lines.iter().enumerate() {
                if y < top + line.height {
                    return Some(LineHit {
                        paragraph: paragraph_index,
                        line: line_index,
                    });
                }
                top += line.height;
            }
        }
        None
    }

    fn last_line_hit(&self) -> Option<LineHit> {
        self.paragraphs
            .iter()
            .enumerate()
            .rev()
            .find_map(|(paragraph, p)| {
                let line = p.lines.len().checked_sub(1)?;
                Some(LineHit { paragraph, line })
            })
    }
}

/// The glyph whose horizontal extent contains `x`, clamped to the first and last glyph.
fn hit_glyph<N: Coord>(boxes: &[GlyphBox<N>], x: N) -> Option<&GlyphBox<N>> {
    let first = boxes.first()?;
    if x < first.x {
        return Some(first);
    }
    boxes
        .iter()
        .find(|glyph| x < glyph.x + glyph.advance)
        .or_else(|| boxes.last())
}
