// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests that don't fit a more specific topic.

use linework::{
    split_paragraphs, Alignment, ErrorKind, LayoutOptions, Point, TextLayout, TextRange,
};
use linework_dev::{layout, MonoBackend, StyledText, TextSamples, TextStyle};

use crate::util::{all_lines, draw, mono};

#[test]
fn basic_layout_of_samples() {
    let samples = TextSamples::new();
    for sample in [
        &samples.arabic,
        &samples.latin,
        &samples.japanese,
        &samples.mixed,
    ] {
        let mut layout = mono(sample.text, 120.0_f64);
        let lines = all_lines(&mut layout);
        assert!(!lines.is_empty(), "{} has lines", sample.name);
        let last = lines.last().unwrap();
        assert_eq!(last.text_end, sample.text.len(), "{} covers its text", sample.name);
        let painted = draw(&mut layout);
        let glyphs: usize = painted.iter().map(|run| run.glyphs.len()).sum();
        assert_eq!(
            glyphs,
            sample.text.chars().filter(|&ch| ch != '\n').count(),
            "{} paints every character",
            sample.name
        );
    }
}

#[test]
fn basic_arabic_sample_is_rtl() {
    let samples = TextSamples::new();
    let mut layout = mono(samples.arabic.text, 1000);
    assert!(layout.is_paragraph_rtl(0));
    let line = layout.line_metrics(0).unwrap();
    assert_eq!(line.x + line.width, 1000);
}

#[test]
fn basic_options_round_trip() {
    let mut layout = mono("abc", 100);
    assert_eq!(*layout.options(), LayoutOptions::default());
    let options = LayoutOptions::default()
        .with_alignment(Alignment::Middle)
        .with_word_wrap(false)
        .with_break_words(true)
        .with_fill_background(false);
    layout.set_options(options);
    assert_eq!(*layout.options(), options);
    assert_eq!(layout.width(), 100);
    assert_eq!(layout.line_metrics(0).unwrap().x, 35);
}

#[test]
fn basic_debug_output() {
    let mut layout = mono("abc", 100);
    layout.line_count();
    let debug = format!("{layout:?}");
    assert!(debug.starts_with("TextLayout"));
    assert!(debug.contains("paragraphs: 1"));
    assert!(format!("{:?}", layout.cache()).contains("misses: 1"));
}

#[test]
fn basic_invalid_ranges_are_rejected() {
    let mut text = StyledText::new("h\u{e9}llo");
    let err = text.set_style(0..2, TextStyle::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotOnCharBoundary);
    let err = text.set_style(3..20, TextStyle::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidBounds);
    assert_eq!(err.len(), 6);
}

#[test]
fn basic_paragraph_splitting() {
    let ranges = split_paragraphs("a\nb\r\nc\u{2029}", false);
    let ranges: Vec<_> = ranges.iter().map(|range| range.as_range()).collect();
    assert_eq!(ranges, [0..1, 2..3, 5..6, 9..9]);
    assert_eq!(split_paragraphs("a\nb", true).len(), 1);
}

#[test]
fn basic_float_coordinates() {
    let mut layout = mono("The quick brown fox", 100.0_f32);
    let lines = all_lines(&mut layout);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].width, 90.0);
    assert_eq!(layout.text_from_pos(15.5, 25.0), 11);
}

#[test]
fn basic_default_style_applies_everywhere() {
    let text = StyledText::new("abc").with_default_style(TextStyle::default().with_advance(7));
    let mut layout = layout(text, 100);
    assert_eq!(layout.content_width(), 21);
}

#[test]
fn basic_paragraph_without_runs_is_dropped() {
    let bold = TextStyle::default().with_weight(700);
    let mut text = StyledText::new("ab\nxx\ncd");
    text.set_style(3..5, bold).unwrap();
    let mut backend = MonoBackend::new();
    backend.fail_analysis(bold);
    let mut layout = TextLayout::new(text, backend, 100);

    assert_eq!(layout.paragraph_count(), 3);
    assert_eq!(layout.line_count(), 2);
    assert_eq!(layout.content_height(), 40);
    let lines = all_lines(&mut layout);
    assert_eq!((lines[0].text_begin, lines[0].text_end), (0, 2));
    assert_eq!((lines[1].text_begin, lines[1].text_end, lines[1].top), (6, 8, 20));

    // Offsets inside the dropped paragraph clamp to its end.
    for pos in 3..=5 {
        let cursor = layout.cursor_from_text_offset(pos);
        assert_eq!(cursor.paragraph, 1);
        assert_eq!(layout.text_offset_from_cursor(cursor), 5);
    }
    assert_eq!(layout.text_from_pos(5, 25), 6);

    assert!(layout.select_to(Point::new(5, 5), Point::new(5, 25)));
    assert_eq!(layout.selected_text(), TextRange::new_unchecked(0, 7));
    let painted = draw(&mut layout);
    let runs: Vec<_> = painted
        .iter()
        .map(|run| (run.text(), run.selected))
        .collect();
    assert_eq!(
        runs,
        [
            ("ab".to_owned(), true),
            ("c".to_owned(), true),
            ("d".to_owned(), false)
        ]
    );
}

#[test]
fn basic_every_paragraph_dropped() {
    let mut backend = MonoBackend::new();
    backend.fail_analysis(TextStyle::default());
    let mut layout = TextLayout::new(StyledText::new("ab\ncd"), backend, 100);
    assert_eq!(layout.paragraph_count(), 2);
    assert_eq!(layout.line_count(), 0);
    assert_eq!(layout.content_height(), 0);
    assert_eq!(layout.line_metrics(0), None);
    assert!(draw(&mut layout).is_empty());
}
