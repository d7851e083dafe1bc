// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection tracking.

use super::{GlyphCursor, TextCursor, TextLayout};
use crate::{Coord, Point, ShapingBackend, TextRange, TextSource};

/// Phase of the selection gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// No selection gesture has been started.
    #[default]
    Inactive,
    /// A selection gesture is in progress.
    Dragging,
    /// A selection exists and no gesture is in progress.
    Fixed,
}

/// The selected glyph range and the glyph offsets it is re-anchored from after reshaping.
#[derive(Clone, Debug, Default)]
pub(crate) struct Selection {
    state: SelectionState,
    /// Half-open, ordered.
    range: Option<(GlyphCursor, GlyphCursor)>,
    /// `(paragraph, glyph offset)` of both ends of `range`.
    anchors: Option<((usize, usize), (usize, usize))>,
    /// The paragraphs of the anchors were reshaped; `range` must be recomputed.
    stale: bool,
}

impl Selection {
    pub(crate) fn state(&self) -> SelectionState {
        self.state
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn mark_stale(&mut self) {
        if self.range.is_some() {
            self.stale = true;
        }
    }
}

impl<N, S, T> TextLayout<N, S, T>
where
    N: Coord,
    S: ShapingBackend<N>,
    T: TextSource<Style = S::Style>,
{
    /// Starts a selection gesture, dropping any previous selection.
    pub fn selection_begin(&mut self) {
        self.selection = Selection {
            state: SelectionState::Dragging,
            ..Selection::default()
        };
        self.apply_selection();
    }

    /// Ends the selection gesture. The selection itself is kept.
    pub fn selection_end(&mut self) {
        if self.selection.state == SelectionState::Dragging {
            self.selection.state = SelectionState::Fixed;
        }
    }

    /// Selects the text between two points, in reading order.
    ///
    /// The cluster under the later point is included in the selection. Returns `true` if
    /// the selected range changed.
    pub fn select_to(&mut self, from: Point<N>, to: Point<N>) -> bool {
        let a = self.cursor_from_point(from.x, from.y);
        let b = self.cursor_from_point(to.x, to.y);
        let (begin, last) = if b < a { (b, a) } else { (a, b) };
        let end = GlyphCursor::new(
            last.paragraph,
            self.paragraphs[last.paragraph].next_cluster(last.cursor),
        );
        self.set_selection(begin, end)
    }

    /// Selects the clusters covering `range` of the text.
    ///
    /// Returns `true` if the selected range changed.
    pub fn select_range(&mut self, range: TextRange) -> bool {
        let a = self.cursor_from_text_offset(range.pos());
        let b = self.cursor_from_text_offset(range.end());
        let (begin, end) = if b < a { (b, a) } else { (a, b) };
        self.set_selection(begin, end)
    }

    /// Removes the selection and ends any gesture.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.apply_selection();
    }

    /// Phase of the selection gesture.
    pub fn selection_state(&self) -> SelectionState {
        self.selection.state
    }

    /// Returns `true` if at least one glyph is selected.
    pub fn has_selection(&mut self) -> bool {
        self.selection_cursors()
            .is_some_and(|(begin, end)| begin < end)
    }

    /// The selected glyph range, half-open, with `begin <= end`.
    pub fn selection_cursors(&mut self) -> Option<(GlyphCursor, GlyphCursor)> {
        self.ensure_lines();
        self.selection.range
    }

    /// The selected text. Empty when nothing is selected.
    pub fn selected_text(&mut self) -> TextRange {
        let Some((begin, end)) = self.selection_cursors() else {
            return TextRange::default();
        };
        let a = self.text_offset_from_cursor(begin);
        let b = self.text_offset_from_cursor(end);
        TextRange::new_unchecked(a.min(b), a.abs_diff(b))
    }

    /// Returns `true` if a point lies on selected text.
    pub fn is_inside_selection(&mut self, x: N, y: N) -> bool {
        if !self.is_inside_text(x, y) {
            return false;
        }
        let cursor = self.cursor_from_point(x, y);
        self.selection_cursors()
            .is_some_and(|(begin, end)| begin <= cursor && cursor < end)
    }

    /// Sets the background color of selected text.
    pub fn set_selection_color(&mut self, color: T::Brush) {
        self.selection_colors.background = Some(color);
        self.reset_paint_runs();
    }

    /// Sets the color of selected text.
    pub fn set_selection_text_color(&mut self, color: T::Brush) {
        self.selection_colors.text = Some(color);
        self.reset_paint_runs();
    }

    fn set_selection(&mut self, begin: GlyphCursor, end: GlyphCursor) -> bool {
        if self.selection.state == SelectionState::Inactive {
            self.selection.state = SelectionState::Fixed;
        }
        if self.selection.range == Some((begin, end)) {
            return false;
        }
        let anchor = |cursor: GlyphCursor| {
            (
                cursor.paragraph,
                self.paragraphs[cursor.paragraph].glyph_offset(cursor.cursor),
            )
        };
        self.selection.anchors = Some((anchor(begin), anchor(end)));
        self.selection.range = Some((begin, end));
        self.selection.stale = false;
        self.apply_selection();
        true
    }

    /// Re-anchors the selection after the paragraphs it spans were reshaped.
    pub(crate) fn ensure_selection(&mut self) {
        if !self.selection.stale {
            return;
        }
        self.selection.stale = false;
        let Some(((bp, bg), (ep, eg))) = self.selection.anchors else {
            return;
        };
        if bp >= self.paragraphs.len() || ep >= self.paragraphs.len() {
            log::debug!("selection anchors out of range; clearing the selection");
            self.selection.clear();
        } else {
            let begin = GlyphCursor::new(bp, self.paragraphs[bp].cursor_from_glyph_offset(bg));
            let end = GlyphCursor::new(ep, self.paragraphs[ep].cursor_from_glyph_offset(eg));
            self.selection.range = Some((begin, end));
        }
        self.apply_selection();
    }

    /// Derives the selected sub-range of every paragraph. Paragraphs whose sub-range
    /// changed lose their paint runs.
    fn apply_selection(&mut self) {
        let range = self.selection.range.filter(|(begin, end)| begin < end);
        for (index, paragraph) in self.paragraphs.iter_mut().enumerate() {
            let selection = range.and_then(|(begin, end)| {
                if index < begin.paragraph || index > end.paragraph {
                    return None;
                }
                let start = if index == begin.paragraph {
                    begin.cursor
                } else {
                    TextCursor::default()
                };
                let stop = if index == end.paragraph {
                    end.cursor
                } else {
                    paragraph.end_cursor()
                };
                (start < stop).then_some((start, stop))
            });
            if selection != paragraph.selection {
                paragraph.selection = selection;
                paragraph.reset_paint_runs();
            }
        }
    }
}
