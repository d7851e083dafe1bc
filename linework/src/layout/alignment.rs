// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use super::line::LayoutLine;
use super::{Alignment, TextCursor};
use crate::paragraph::Paragraph;
use crate::{Coord, ShapingBackend};

/// Alignment after taking the paragraph direction into account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ResolvedAlignment {
    Left,
    Right,
    Center,
    Justify,
}

/// Right-to-left paragraphs are right aligned unless the text is centered or justified.
pub(crate) fn resolve_alignment(alignment: Alignment, is_rtl: bool) -> ResolvedAlignment {
    match (alignment, is_rtl) {
        (Alignment::Middle, _) => ResolvedAlignment::Center,
        (Alignment::Justified, _) => ResolvedAlignment::Justify,
        (_, true) => ResolvedAlignment::Right,
        (Alignment::Start | Alignment::Left, false) => ResolvedAlignment::Left,
        (Alignment::End | Alignment::Right, false) => ResolvedAlignment::Right,
    }
}

/// Stretches the justification opportunities of `line` so that it fills `target`.
///
/// Opportunities are whitespace clusters of simple runs and glyphs of complex runs whose
/// justification class allows it. Each receives an even share of the missing width; the
/// last one receives whatever is left so the line ends exactly at `target`. A hanging space
/// is left out of the justified advances. Returns `false` and leaves the line untouched when
/// there is nothing to stretch.
pub(crate) fn justify<N, S, B>(
    paragraph: &Paragraph<N, S::Style, B>,
    line: &mut LayoutLine<N, B>,
    target: N,
    backend: &S,
) -> bool
where
    N: Coord,
    S: ShapingBackend<N>,
{
    let mut advances = Vec::new();
    let mut opportunities = Vec::new();
    for (run_index, glyphs) in line.glyph_spans(paragraph) {
        let run = &paragraph.runs[run_index];
        let cache = &paragraph.caches[run_index];
        for glyph in glyphs {
            // The hanging space is not part of the justified width.
            if line.is_hanging(TextCursor::new(run_index, glyph)) {
                break;
            }
            if !run.is_inline_object() {
                let is_opportunity = if run.is_complex {
                    backend.char_justification_class(cache, glyph).is_opportunity()
                } else {
                    cache.is_cluster_start(glyph) && cache.attr_of_glyph(glyph).is_whitespace
                };
                if is_opportunity {
                    opportunities.push(advances.len());
                }
            }
            advances.push(cache.advances()[glyph]);
        }
    }
    if opportunities.is_empty() {
        return false;
    }

    let extra = target - line.width;
    let share = extra.share(opportunities.len());
    let mut remaining = extra;
    let last = opportunities.len() - 1;
    for (i, &index) in opportunities.iter().enumerate() {
        let increment = if i == last {
            remaining
        } else {
            share.min_of(remaining)
        };
        advances[index] += increment;
        remaining -= increment;
    }
    line.justified_advances = advances;
    line.justify = true;
    line.width = target;
    true
}
