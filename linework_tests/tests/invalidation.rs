// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notification tests.

use linework::{TextLayout, TextRange};
use linework_dev::{layout, Color, MonoBackend, StyledText, TextStyle};

use crate::util::{draw, mono};

fn versions(layout: &linework_dev::MonoLayout<i32>) -> Vec<Option<u64>> {
    (0..3).map(|index| layout.paragraph_version(index)).collect()
}

#[test]
fn invalidation_versions_start_after_line_breaking() {
    let mut layout = mono("ab\ncd\nef", 100);
    assert_eq!(layout.paragraph_version(0), None);
    assert_eq!(layout.line_count(), 3);
    assert_eq!(versions(&layout), [Some(1), Some(2), Some(3)]);
    assert_eq!(layout.paragraph_version(3), None);
}

#[test]
fn invalidation_text_replaced_keeps_untouched_paragraphs() {
    let mut layout = mono("ab\ncd\nef", 100);
    layout.line_count();
    assert_eq!(layout.backend().shaped_runs(), 3);

    let old = TextRange::new_unchecked(3, 2);
    layout.text_mut().replace(old, "xyz").unwrap();
    layout.on_text_replaced(old, 3);
    assert_eq!(layout.paragraph_range(2).map(|r| r.pos()), Some(7));
    assert_eq!(layout.line_count(), 3);

    let after = versions(&layout);
    assert_eq!(after[0], Some(1));
    assert_eq!(after[2], Some(3));
    assert!(after[1] > Some(3));
    assert_eq!(layout.backend().shaped_runs(), 4);
    assert_eq!(layout.line_metrics(2).unwrap().text_begin, 7);
    assert_eq!(layout.line_metrics(1).unwrap().width, 30);
}

#[test]
fn invalidation_new_paragraph_from_edit() {
    let mut layout = mono("ab\ncd", 100);
    layout.line_count();
    let old = TextRange::new_unchecked(1, 0);
    layout.text_mut().replace(old, "\n").unwrap();
    layout.on_text_replaced(old, 1);
    assert_eq!(layout.paragraph_count(), 3);
    assert_eq!(layout.line_count(), 3);
    assert_eq!(layout.text_from_pos(5, 25), 2);
}

#[test]
fn invalidation_style_change_reshapes_overlapping_paragraph() {
    let mut layout = mono("ab\ncd\nef", 100);
    layout.line_count();
    let range = layout
        .text_mut()
        .set_style(3..5, TextStyle::default().with_advance(20))
        .unwrap();
    layout.on_style_changed(range);
    assert_eq!(layout.content_width(), 40);
    assert_eq!(layout.backend().shaped_runs(), 4);
    let after = versions(&layout);
    assert_eq!((after[0], after[2]), (Some(1), Some(3)));
}

#[test]
fn invalidation_color_change() {
    let mut layout = mono("ab\ncd\nef", 100);
    layout.line_count();
    let range = layout.text_mut().set_color(6..8, Color::RED).unwrap();
    layout.on_color_changed(range);
    let painted = draw(&mut layout);
    assert_eq!(painted[2].text_color, Color::RED);
    assert_eq!(painted[0].text_color, Color::BLACK);
    assert_eq!(layout.backend().shaped_runs(), 4);
}

#[test]
fn invalidation_text_modified_rebuilds_everything() {
    let mut layout = mono("ab\ncd", 100);
    layout.line_count();
    *layout.text_mut() = StyledText::new("one two three");
    layout.on_text_modified();
    assert_eq!(layout.paragraph_count(), 1);
    assert_eq!(layout.line_count(), 2);
    assert_eq!(layout.backend().shaped_runs(), 3);
}

#[test]
fn invalidation_resize_rebreaks_without_reshaping() {
    let mut layout = mono("ab\ncd\nef", 100);
    layout.line_count();
    layout.resize(10);
    assert_eq!(layout.line_count(), 3);
    assert_eq!(versions(&layout), [Some(4), Some(5), Some(6)]);
    assert_eq!(layout.backend().shaped_runs(), 3);
    // Resizing to the current width is a no-op.
    layout.resize(10);
    layout.line_count();
    assert_eq!(versions(&layout), [Some(4), Some(5), Some(6)]);
}

#[test]
fn invalidation_metrics_cache_is_reused() {
    let mut layout = mono("ab\ncd\nef", 100);
    layout.line_count();
    assert_eq!(layout.cache().misses(), 1);
    assert_eq!(layout.cache().len(), 1);

    let (text, backend, cache) = layout.into_parts();
    let mut layout = TextLayout::with_cache(text, backend, cache, 50);
    layout.line_count();
    assert_eq!(layout.cache().misses(), 1);
    assert!(layout.cache().hits() >= 4);
}

#[test]
fn invalidation_fallback_font_is_used() {
    let mut backend = MonoBackend::new();
    backend.fail_primary(TextStyle::default());
    let mut layout = TextLayout::new(StyledText::new("ab"), backend, 100);
    assert_eq!(layout.content_width(), 20);
}

#[test]
fn invalidation_unshapeable_run_has_no_width() {
    let bold = TextStyle::default().with_weight(700);
    let mut backend = MonoBackend::new();
    backend.fail_always(bold);
    let mut text = StyledText::new("abcd");
    text.set_style(2..4, bold).unwrap();
    let mut layout = TextLayout::new(text, backend, 100);
    assert_eq!(layout.line_count(), 1);
    assert_eq!(layout.content_width(), 20);
}

#[test]
fn invalidation_single_line_toggle_clears_selection() {
    let mut layout = layout(StyledText::new("ab\ncd"), 100);
    layout.select_range(TextRange::new_unchecked(0, 4));
    assert!(layout.has_selection());
    layout.set_single_line(true);
    assert!(!layout.has_selection());
}
