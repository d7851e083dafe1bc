// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

use linework::{Coord, LineMetrics};
use linework_dev::{layout, MonoLayout, PaintedRun, RecordingPainter, StyledText};

/// A layout of `text` in the default style.
pub(crate) fn mono<N: Coord>(text: &str, width: N) -> MonoLayout<N> {
    layout(StyledText::new(text), width)
}

/// Metrics of every line.
pub(crate) fn all_lines<N: Coord>(layout: &mut MonoLayout<N>) -> Vec<LineMetrics<N>> {
    (0..layout.line_count())
        .filter_map(|index| layout.line_metrics(index))
        .collect()
}

/// The text of every line, including trailing spaces the line broke at.
pub(crate) fn line_texts<N: Coord>(layout: &mut MonoLayout<N>) -> Vec<String> {
    let lines = all_lines(layout);
    let text = layout.text().as_str();
    lines
        .iter()
        .map(|line| text[line.text_begin..line.text_end].to_owned())
        .collect()
}

/// Draws the layout at the origin and returns what was painted.
pub(crate) fn draw<N: Coord>(layout: &mut MonoLayout<N>) -> Vec<PaintedRun<N>> {
    let mut painter = RecordingPainter::default();
    layout.draw(N::ZERO, N::ZERO, &mut painter);
    painter.runs
}
