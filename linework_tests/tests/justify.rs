// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Justification and alignment tests.

use linework::Alignment;
use linework_dev::{layout, StyledText, TextStyle};

use crate::util::{all_lines, draw, mono};

#[test]
fn justify_distributes_extra_space_between_words() {
    let mut layout = mono("aa bb cc dd", 100);
    layout.set_alignment(Alignment::Justified);
    let lines = all_lines(&mut layout);
    assert_eq!(lines.len(), 2);
    assert_eq!((lines[0].x, lines[0].width), (0, 100));
    assert_eq!(lines[0].trailing_whitespace, 10);

    let painted = draw(&mut layout);
    assert_eq!(painted[0].text(), "aa bb cc");
    // The two inner spaces share the missing 20 units.
    assert_eq!(painted[0].advances, [10, 10, 20, 10, 10, 20, 10, 10]);
    let sum: i32 = painted[0].advances.iter().sum();
    assert_eq!(sum, 100);
    // The hanging space keeps its natural advance past the line width.
    assert_eq!(painted[1].text(), " ");
    assert_eq!(painted[1].x, 100);
    assert_eq!(painted[1].advances, [10]);

    let runs = layout.line_paint_runs(0);
    assert_eq!(runs.len(), 2);
    assert!(runs[0].is_justified());
    assert!(!runs[1].is_justified());
    assert_eq!(runs[0].width(), 100);
}

#[test]
fn justify_skips_the_last_line() {
    let mut layout = mono("aa bb cc dd", 100);
    layout.set_alignment(Alignment::Justified);
    let last = layout.line_metrics(1).unwrap();
    assert_eq!((last.x, last.width), (0, 20));
    let painted = draw(&mut layout);
    assert_eq!(painted.len(), 3);
    assert_eq!(painted[2].advances, [10, 10]);
}

#[test]
fn justify_needs_word_wrap() {
    let mut layout = mono("aa bb cc dd", 200);
    layout.set_alignment(Alignment::Justified);
    layout.set_word_wrap(false);
    let lines = all_lines(&mut layout);
    assert_eq!(lines.len(), 1);
    assert_eq!((lines[0].x, lines[0].width), (0, 110));
    assert!(layout.line_paint_runs(0).iter().all(|run| !run.is_justified()));
}

#[test]
fn justify_without_opportunities_keeps_natural_width() {
    let mut text = StyledText::new("aaaaaabbbbbb");
    text.set_style(6..12, TextStyle::default().with_weight(700)).unwrap();
    let mut layout = layout(text, 100);
    layout.set_alignment(Alignment::Justified);
    let first = layout.line_metrics(0).unwrap();
    assert_eq!((first.x, first.width), (0, 60));
    let painted = draw(&mut layout);
    assert_eq!(painted[0].advances, [10; 6]);
}

#[test]
fn justify_ideographs_between_characters() {
    let mut layout = mono(
        "\u{3044}\u{308d}\u{306f}\u{306b}\u{307b}\u{3078}\u{3068}\u{3061}\u{308a}",
        45.0_f32,
    );
    layout.set_alignment(Alignment::Justified);
    let lines = all_lines(&mut layout);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].width, 45.0);
    let painted = draw(&mut layout);
    assert_eq!(painted[0].advances, [11.25; 4]);
    assert_eq!(painted[2].advances, [10.0]);
}

#[test]
fn justify_integer_shares_add_up() {
    // Three spaces share 7 units: 3, 3, then the remaining 1.
    let mut layout = mono("a b c d eeee", 77);
    layout.set_alignment(Alignment::Justified);
    let painted = draw(&mut layout);
    assert_eq!(painted[0].text(), "a b c d");
    assert_eq!(painted[0].advances, [10, 13, 10, 13, 10, 11, 10]);
    assert_eq!(layout.line_metrics(0).unwrap().width, 77);
}

#[test]
fn justify_toggle_restores_natural_advances() {
    let mut layout = mono("aa bb cc dd", 100);
    layout.set_alignment(Alignment::Justified);
    assert_eq!(layout.line_metrics(0).unwrap().width, 100);
    layout.set_alignment(Alignment::Start);
    assert_eq!(layout.line_metrics(0).unwrap().width, 80);
    let painted = draw(&mut layout);
    assert_eq!(painted[0].advances, [10; 9]);
}

#[test]
fn align_right_and_center() {
    let mut layout = mono("abcd", 100);
    layout.set_alignment(Alignment::Right);
    assert_eq!(layout.line_metrics(0).unwrap().x, 60);
    layout.set_alignment(Alignment::End);
    assert_eq!(layout.line_metrics(0).unwrap().x, 60);
    layout.set_alignment(Alignment::Middle);
    assert_eq!(layout.line_metrics(0).unwrap().x, 30);
    layout.set_alignment(Alignment::Left);
    assert_eq!(layout.line_metrics(0).unwrap().x, 0);
}

#[test]
fn align_center_rounds_down_for_integers() {
    let mut layout = mono("abc", 75);
    layout.set_alignment(Alignment::Middle);
    assert_eq!(layout.line_metrics(0).unwrap().x, 22);
}

#[test]
fn align_moves_painting_and_hit_testing() {
    let mut layout = mono("abcd", 100);
    layout.set_alignment(Alignment::Right);
    let painted = draw(&mut layout);
    assert_eq!(painted[0].x, 60);
    assert_eq!(layout.text_from_pos(65, 5), 0);
    assert_eq!(layout.text_from_pos(95, 5), 3);
    assert!(!layout.is_inside_text(30, 5));
}
