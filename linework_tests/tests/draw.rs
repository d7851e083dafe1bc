// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint run and drawing tests.

use linework::TextLayout;
use linework_dev::{layout, Color, MonoBackend, RecordingPainter, StyledText};

use crate::util::draw;

#[test]
fn draw_splits_runs_at_color_changes() {
    let mut text = StyledText::new("hello world");
    text.set_color(0..5, Color::RED).unwrap();
    let mut layout = layout(text, 200);
    let painted = draw(&mut layout);
    assert_eq!(painted.len(), 2);
    assert_eq!((painted[0].text().as_str(), painted[0].text_color), ("hello", Color::RED));
    assert_eq!(
        (painted[1].text().as_str(), painted[1].text_color),
        (" world", Color::BLACK)
    );
    assert_eq!((painted[0].x, painted[1].x), (0, 50));
    assert_eq!((painted[0].width, painted[1].width), (50, 60));
}

#[test]
fn draw_backgrounds() {
    let mut text = StyledText::new("hello world");
    text.set_background(6..11, Color::YELLOW).unwrap();
    let mut layout = layout(text, 200);
    let painted = draw(&mut layout);
    assert_eq!(painted.len(), 2);
    assert_eq!(painted[0].background_color, None);
    assert!(!painted[0].fill_background);
    assert_eq!(painted[1].background_color, Some(Color::YELLOW));
    assert!(painted[1].fill_background);

    layout.set_fill_background(false);
    let painted = draw(&mut layout);
    assert_eq!(painted[1].background_color, Some(Color::YELLOW));
    assert!(!painted[1].fill_background);
}

#[test]
fn draw_at_origin() {
    let mut layout = layout(StyledText::new("ab\ncd"), 100);
    let mut painter = RecordingPainter::default();
    layout.draw(5, 7, &mut painter);
    let painted = painter.runs;
    assert_eq!(painted.len(), 2);
    assert_eq!((painted[0].x, painted[0].top, painted[0].baseline), (5, 7, 23));
    assert_eq!((painted[1].x, painted[1].top, painted[1].baseline), (5, 27, 43));
    assert_eq!(painted[1].text_range, 3..5);
}

#[test]
fn draw_inline_object() {
    let mut backend = MonoBackend::new();
    let object = backend.add_object(30, 40);
    let mut text = StyledText::new("ab");
    text.insert_object(1, object).unwrap();
    let mut layout = TextLayout::new(text, backend, 100);

    let line = layout.line_metrics(0).unwrap();
    // The object sits on the baseline and pushes it down.
    assert_eq!((line.height, line.ascent), (44, 40));
    assert_eq!(layout.content_width(), 50);

    let painted = draw(&mut layout);
    assert_eq!(painted.len(), 3);
    assert_eq!(painted[1].inline_object, Some(object));
    assert_eq!((painted[1].x, painted[1].width), (10, 30));
    assert_eq!(painted[1].text_range, 1..4);
    assert_eq!(painted[2].x, 40);
    assert_eq!(layout.text_from_pos(25, 5), 1);
}

#[test]
fn draw_paint_run_accessors() {
    let mut text = StyledText::new("hello world");
    text.set_color(6..11, Color::BLUE).unwrap();
    let mut layout = layout(text, 200);
    let runs = layout.line_paint_runs(0);
    assert_eq!(runs.len(), 2);
    let run = &runs[1];
    assert_eq!(run.run_index(), 0);
    assert_eq!(run.glyph_range(), 6..11);
    assert_eq!(run.glyph_count(), 5);
    assert_eq!(run.width(), 50);
    assert_eq!(*run.text_color(), Color::BLUE);
    assert_eq!(run.background_color(), None);
    assert!(!run.fill_background());
    assert!(!run.is_selected());
    assert!(!run.is_justified());
    assert!(layout.line_paint_runs(5).is_empty());
}

#[test]
fn draw_mark_offsets() {
    let mut layout = layout(StyledText::new("e\u{301}x"), 100);
    let painted = draw(&mut layout);
    assert_eq!(painted.len(), 2);
    assert_eq!(painted[0].advances, [10, 0]);
    let offsets: Vec<_> = painted[0]
        .offsets
        .iter()
        .map(|offset| (offset.dx, offset.dy))
        .collect();
    assert_eq!(offsets, [(0, 0), (-5, 0)]);
    assert!(painted[1].offsets.is_empty());
}

#[test]
fn draw_missing_glyphs_use_the_fallback_font() {
    let mut layout = layout(StyledText::new("a\u{e000}b"), 100);
    assert_eq!(layout.content_width(), 30);
    let painted = draw(&mut layout);
    assert_eq!(painted.len(), 3);
    assert_eq!(painted[1].glyphs, [0]);
    assert_eq!(painted[1].text_range, 1..4);
    assert_eq!(layout.backend().shaped_runs(), 3);
}
