// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection tests.

use linework::{Point, SelectionState, TextRange};
use linework_dev::{Color, TextStyle};

use crate::util::{draw, mono};

fn selected_flags(layout: &mut linework_dev::MonoLayout<i32>, line: usize) -> Vec<bool> {
    layout
        .line_paint_runs(line)
        .iter()
        .map(|run| run.is_selected())
        .collect()
}

#[test]
fn selection_of_a_text_range() {
    let mut layout = mono("The quick brown fox", 100);
    assert!(layout.select_range(TextRange::new_unchecked(4, 5)));
    assert!(layout.has_selection());
    assert_eq!(layout.selection_state(), SelectionState::Fixed);
    assert_eq!(layout.selected_text(), TextRange::new_unchecked(4, 5));
    assert_eq!(selected_flags(&mut layout, 0), [false, true, false]);
    assert_eq!(selected_flags(&mut layout, 1), [false]);
}

#[test]
fn selection_includes_the_cluster_under_the_focus() {
    let mut layout = mono("The quick brown fox", 100);
    assert!(layout.select_to(Point::new(5, 5), Point::new(45, 5)));
    assert_eq!(layout.selected_text(), TextRange::new_unchecked(0, 5));
    // Nothing changes when the same points are selected again.
    assert!(!layout.select_to(Point::new(5, 5), Point::new(45, 5)));
}

#[test]
fn selection_backwards_drag_is_ordered() {
    let mut layout = mono("The quick brown fox", 100);
    layout.select_to(Point::new(45, 25), Point::new(5, 5));
    let (begin, end) = layout.selection_cursors().unwrap();
    assert!(begin <= end);
    assert_eq!(layout.selected_text(), TextRange::new_unchecked(0, 15));
}

#[test]
fn selection_across_paragraphs_selects_middle_ones_fully() {
    let mut layout = mono("one\ntwo\nthree", 100);
    layout.select_to(Point::new(5, 5), Point::new(5, 45));
    assert!(layout.has_selection());
    let (begin, end) = layout.selection_cursors().unwrap();
    assert!(begin.paragraph < end.paragraph);
    let middle = layout.line_paint_runs(1);
    assert_eq!(middle.len(), 1);
    assert!(middle[0].is_selected());
    assert_eq!(middle[0].glyph_range(), 0..3);
    assert_eq!(selected_flags(&mut layout, 2), [true, false]);
    assert_eq!(layout.selected_text(), TextRange::new_unchecked(0, 9));
}

#[test]
fn selection_gesture_states() {
    let mut layout = mono("The quick brown fox", 100);
    assert_eq!(layout.selection_state(), SelectionState::Inactive);
    layout.selection_begin();
    assert_eq!(layout.selection_state(), SelectionState::Dragging);
    layout.select_to(Point::new(5, 5), Point::new(25, 5));
    assert_eq!(layout.selection_state(), SelectionState::Dragging);
    layout.selection_end();
    assert_eq!(layout.selection_state(), SelectionState::Fixed);
    assert!(layout.has_selection());
    layout.clear_selection();
    assert_eq!(layout.selection_state(), SelectionState::Inactive);
    assert!(!layout.has_selection());
    assert!(layout.selected_text().is_empty());
    assert_eq!(selected_flags(&mut layout, 0), [false]);
}

#[test]
fn selection_hit_testing() {
    let mut layout = mono("The quick brown fox", 100);
    layout.select_range(TextRange::new_unchecked(4, 5));
    assert!(layout.is_inside_selection(45, 5));
    assert!(!layout.is_inside_selection(15, 5));
    assert!(!layout.is_inside_selection(95, 25), "outside the text");
}

#[test]
fn selection_colors_are_painted() {
    let mut layout = mono("The quick brown fox", 100);
    layout.set_selection_color(Color::YELLOW);
    layout.set_selection_text_color(Color::WHITE);
    layout.select_range(TextRange::new_unchecked(4, 5));
    let painted = draw(&mut layout);
    let selected: Vec<_> = painted.iter().filter(|run| run.selected).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].text(), "quick");
    assert_eq!(selected[0].text_color, Color::WHITE);
    assert_eq!(selected[0].background_color, Some(Color::YELLOW));
    assert!(selected[0].fill_background);
    assert_eq!(painted[0].text_color, Color::BLACK);
    assert!(!painted[0].fill_background);
}

#[test]
fn selection_survives_style_change() {
    let mut layout = mono("The quick brown fox", 200);
    layout.select_range(TextRange::new_unchecked(4, 5));
    let range = layout
        .text_mut()
        .set_style(0..3, TextStyle::default().with_advance(20))
        .unwrap();
    layout.on_style_changed(range);
    assert_eq!(layout.selected_text(), TextRange::new_unchecked(4, 5));
    // "The" is now twice as wide, so "quick" starts at x = 70.
    assert!(layout.is_inside_selection(75, 5));
    assert!(!layout.is_inside_selection(45, 5));
}

#[test]
fn selection_cleared_by_edits() {
    let mut layout = mono("The quick brown fox", 100);
    layout.select_range(TextRange::new_unchecked(4, 5));
    let old = TextRange::new_unchecked(0, 3);
    layout.text_mut().replace(old, "A").unwrap();
    layout.on_text_replaced(old, 1);
    assert!(!layout.has_selection());
    assert_eq!(layout.selection_state(), SelectionState::Inactive);
}
