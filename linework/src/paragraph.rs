// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph splitting and per-paragraph layout state.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::layout::line::LayoutLine;
use crate::layout::TextCursor;
use crate::{Coord, RunCache, TextRange, TextRun};

/// Returns `true` for code points that end a paragraph.
pub fn is_paragraph_separator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Splits `text` into paragraph ranges.
///
/// Separators are not part of any paragraph; a `"\r\n"` pair counts as one separator. Text
/// ending with a separator yields a trailing empty paragraph, and empty text yields a
/// single empty paragraph. In single line mode the whole buffer is one paragraph.
pub fn split_paragraphs(text: &str, single_line: bool) -> Vec<TextRange> {
    if single_line {
        return vec![TextRange::new_unchecked(0, text.len())];
    }
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        if !is_paragraph_separator(ch) {
            continue;
        }
        paragraphs.push(TextRange::new_unchecked(start, offset - start));
        let mut next = offset + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(lf, '\n')) = chars.peek() {
                chars.next();
                next = lf + 1;
            }
        }
        start = next;
    }
    paragraphs.push(TextRange::new_unchecked(start, text.len() - start));
    paragraphs
}

/// A paragraph and everything computed for it.
///
/// Runs, run caches and lines are filled lazily and dropped wholesale when an edit, style
/// change or color change overlaps the paragraph.
#[derive(Clone, Debug)]
pub(crate) struct Paragraph<N, S, B> {
    pub(crate) range: TextRange,
    /// Runs in visual order.
    pub(crate) runs: Vec<TextRun<S>>,
    /// One cache per run, parallel to `runs`.
    pub(crate) caches: Vec<RunCache<N>>,
    pub(crate) lines: Vec<LayoutLine<N, B>>,
    pub(crate) is_rtl: bool,
    pub(crate) analysed: bool,
    pub(crate) shaped: bool,
    /// Analysis produced no runs; the paragraph takes no space.
    pub(crate) dropped: bool,
    /// Changes whenever `lines` is rebuilt. Zero until the first line breaking.
    pub(crate) version: u64,
    /// Selected sub-range, half-open.
    pub(crate) selection: Option<(TextCursor, TextCursor)>,
}

impl<N: Coord, S, B> Paragraph<N, S, B> {
    pub(crate) fn new(range: TextRange) -> Self {
        Self {
            range,
            runs: Vec::new(),
            caches: Vec::new(),
            lines: Vec::new(),
            is_rtl: false,
            analysed: false,
            shaped: false,
            dropped: false,
            version: 0,
            selection: None,
        }
    }

    /// Forgets runs, shapes and lines.
    pub(crate) fn invalidate_shaping(&mut self) {
        self.runs.clear();
        self.caches.clear();
        self.lines.clear();
        self.analysed = false;
        self.shaped = false;
        self.dropped = false;
    }

    /// Forgets line breaking but keeps shaped runs.
    pub(crate) fn invalidate_lines(&mut self) {
        self.lines.clear();
    }

    pub(crate) fn reset_paint_runs(&mut self) {
        for line in &mut self.lines {
            line.paint_runs = None;
        }
    }

    pub(crate) fn needs_lines(&self) -> bool {
        !self.dropped && self.lines.is_empty()
    }

    /// Moves the paragraph and its runs by `delta` bytes.
    pub(crate) fn shift(&mut self, delta: isize) {
        self.range = self.range.shifted(delta);
        for run in &mut self.runs {
            run.range = run.range.shifted(delta);
        }
    }

    /// The cursor one past the last glyph.
    pub(crate) fn end_cursor(&self) -> TextCursor {
        TextCursor::new(self.runs.len(), 0)
    }

    pub(crate) fn glyph_count(&self, run_index: usize) -> usize {
        self.caches
            .get(run_index)
            .map(RunCache::glyph_count)
            .unwrap_or(0)
    }

    /// Moves a cursor sitting past the end of its run onto the first glyph of the next run
    /// that has glyphs.
    pub(crate) fn normalize(&self, mut cursor: TextCursor) -> TextCursor {
        while cursor.run_index < self.runs.len()
            && cursor.run_offset >= self.glyph_count(cursor.run_index)
        {
            cursor.run_index += 1;
            cursor.run_offset = 0;
        }
        if cursor.run_index >= self.runs.len() {
            return self.end_cursor();
        }
        cursor
    }

    /// Returns the cursor one cluster after `cursor`.
    pub(crate) fn next_cluster(&self, cursor: TextCursor) -> TextCursor {
        let cursor = self.normalize(cursor);
        let Some(cache) = self.caches.get(cursor.run_index) else {
            return self.end_cursor();
        };
        let mut offset = cursor.run_offset + 1;
        while offset < cache.glyph_count() && !cache.is_cluster_start(offset) {
            offset += 1;
        }
        self.normalize(TextCursor::new(cursor.run_index, offset))
    }

    /// The cursor of the first glyph of the cluster containing `cursor`.
    pub(crate) fn cluster_start(&self, cursor: TextCursor) -> TextCursor {
        let Some(cache) = self.caches.get(cursor.run_index) else {
            return cursor;
        };
        let mut offset = cursor.run_offset.min(cache.glyph_count());
        while offset > 0 && offset < cache.glyph_count() && !cache.is_cluster_start(offset) {
            offset -= 1;
        }
        TextCursor::new(cursor.run_index, offset)
    }

    /// Text covered by `glyphs` of a run. A run without glyphs covers all of its text.
    ///
    /// Both ends are expected to lie on cluster starts, or at the end of the run.
    pub(crate) fn span_text_range(&self, run_index: usize, glyphs: Range<usize>) -> Range<usize> {
        let (Some(run), Some(cache)) = (self.runs.get(run_index), self.caches.get(run_index))
        else {
            let end = self.range.end();
            return end..end;
        };
        if cache.glyph_count() == 0 {
            return run.range.as_range();
        }
        let pos = |glyph: usize| {
            if glyph >= cache.glyph_count() {
                run.range.end()
            } else {
                run.range.pos() + cache.char_byte_offset(cache.char_of_glyph(glyph))
            }
        };
        pos(glyphs.start)..pos(glyphs.end)
    }

    /// Absolute text offset of a cursor.
    pub(crate) fn text_offset(&self, cursor: TextCursor) -> usize {
        let cursor = self.normalize(cursor);
        let (Some(run), Some(cache)) = (
            self.runs.get(cursor.run_index),
            self.caches.get(cursor.run_index),
        ) else {
            return self.range.end();
        };
        let char_index = cache.char_of_glyph(cursor.run_offset);
        run.range.pos() + cache.char_byte_offset(char_index)
    }

    /// Number of glyphs before `cursor` in run order.
    pub(crate) fn glyph_offset(&self, cursor: TextCursor) -> usize {
        let preceding: usize = (0..cursor.run_index.min(self.runs.len()))
            .map(|run_index| self.glyph_count(run_index))
            .sum();
        preceding + cursor.run_offset.min(self.glyph_count(cursor.run_index))
    }

    /// Inverse of [`Self::glyph_offset`], clamped to the paragraph end.
    pub(crate) fn cursor_from_glyph_offset(&self, mut offset: usize) -> TextCursor {
        for run_index in 0..self.runs.len() {
            let count = self.glyph_count(run_index);
            if offset < count {
                return TextCursor::new(run_index, offset);
            }
            offset -= count;
        }
        self.end_cursor()
    }

    /// Cursor of the cluster containing the absolute text offset `pos`, clamped to the
    /// paragraph.
    pub(crate) fn cursor_from_text_offset(&self, pos: usize) -> TextCursor {
        if pos >= self.range.end() {
            return self.end_cursor();
        }
        for (run_index, (run, cache)) in self.runs.iter().zip(&self.caches).enumerate() {
            if !run.range.contains(pos) {
                continue;
            }
            let relative = pos - run.range.pos();
            let char_index = cache.char_at_byte(relative);
            let glyph = cache.glyph_of_char(char_index);
            return self.normalize(TextCursor::new(run_index, glyph));
        }
        TextCursor::default()
    }
}

#[cfg(test)]
mod tests {
    use super::split_paragraphs;

    fn ranges(text: &str) -> Vec<(usize, usize)> {
        split_paragraphs(text, false)
            .into_iter()
            .map(|range| (range.pos(), range.end()))
            .collect()
    }

    #[test]
    fn splits_on_separators() {
        assert_eq!(ranges("ab\ncd"), vec![(0, 2), (3, 5)]);
        assert_eq!(ranges("ab\r\ncd"), vec![(0, 2), (4, 6)]);
        assert_eq!(ranges("a\u{2029}b"), vec![(0, 1), (4, 5)]);
    }

    #[test]
    fn trailing_separator_yields_empty_paragraph() {
        assert_eq!(ranges("ab\n"), vec![(0, 2), (3, 3)]);
        assert_eq!(ranges(""), vec![(0, 0)]);
        assert_eq!(ranges("\n\n"), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn single_line_mode_keeps_everything() {
        let paragraphs = split_paragraphs("ab\ncd", true);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].length(), 5);
    }
}
