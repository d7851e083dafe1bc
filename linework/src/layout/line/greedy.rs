// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use alloc::vec::Vec;

use crate::layout::TextCursor;
use crate::{Coord, RunCache};

/// A line chosen by the breaker, before vertical metrics are known.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LineBreak<N> {
    pub(crate) begin: TextCursor,
    pub(crate) end: TextCursor,
    pub(crate) width: N,
    /// The whitespace cluster at `end` is skipped: it is neither measured on this line nor
    /// part of the next one.
    pub(crate) skip_space: bool,
}

/// Position where the current line may end.
#[derive(Clone, Copy, Debug)]
struct Opportunity<N> {
    at: TextCursor,
    width: N,
    skip_space: bool,
}

#[derive(Clone, Copy, Debug, Default)]
struct BreakerState<N> {
    /// Start of the line being computed.
    line_start: TextCursor,
    /// Iteration state: the current run.
    run_idx: usize,
    /// Iteration state: the current glyph within the run.
    glyph_idx: usize,
    /// Advance of the content accepted on the line so far.
    x: N,
    /// Whether the line holds at least one cluster.
    has_content: bool,
}

/// Line breaking support for one paragraph.
///
/// Runs are visited in the order given, glyphs in storage order. A line may end before a
/// whitespace cluster, before a cluster whose character allows a soft break, or at a run
/// boundary.
#[derive(Debug)]
pub(crate) struct BreakLines<'a, N> {
    caches: &'a [RunCache<N>],
    max_advance: Option<N>,
    break_words: bool,
    state: BreakerState<N>,
    started: bool,
    done: bool,
}

impl<'a, N: Coord> BreakLines<'a, N> {
    /// Creates a breaker. `max_advance` of `None` disables wrapping.
    pub(crate) fn new(
        caches: &'a [RunCache<N>],
        max_advance: Option<N>,
        break_words: bool,
    ) -> Self {
        Self {
            caches,
            max_advance,
            break_words,
            state: BreakerState::default(),
            started: false,
            done: false,
        }
    }

    fn end_cursor(&self) -> TextCursor {
        TextCursor::new(self.caches.len(), 0)
    }

    fn normalize(&self, mut cursor: TextCursor) -> TextCursor {
        while cursor.run_index < self.caches.len()
            && cursor.run_offset >= self.caches[cursor.run_index].glyph_count()
        {
            cursor.run_index += 1;
            cursor.run_offset = 0;
        }
        cursor
    }

    /// Width of everything from `from` to the end of the paragraph.
    fn remaining_width(&self, from: TextCursor) -> N {
        self.caches
            .iter()
            .enumerate()
            .skip(from.run_index)
            .map(|(run_index, cache)| {
                if run_index == from.run_index {
                    cache.width_of(from.run_offset..cache.glyph_count())
                } else {
                    cache.width()
                }
            })
            .sum()
    }

    /// One past the last glyph of the cluster starting at `glyph`.
    fn cluster_end(cache: &RunCache<N>, glyph: usize) -> usize {
        let mut end = glyph + 1;
        while end < cache.glyph_count() && !cache.is_cluster_start(end) {
            end += 1;
        }
        end
    }

    /// Computes the next line of the paragraph.
    pub(crate) fn break_next(&mut self) -> Option<LineBreak<N>> {
        if self.done {
            return None;
        }
        let begin = if self.started {
            self.normalize(self.state.line_start)
        } else {
            // The first line always starts at the very beginning so glyphless runs at the
            // start of the paragraph still belong to a line.
            TextCursor::default()
        };
        let end = self.end_cursor();
        if self.started && begin >= end {
            self.done = true;
            return None;
        }
        self.started = true;

        let rest = self.remaining_width(begin);
        let max_advance = match self.max_advance {
            Some(max_advance) if rest > max_advance => max_advance,
            _ => {
                self.done = true;
                return Some(LineBreak {
                    begin,
                    end,
                    width: rest,
                    skip_space: false,
                });
            }
        };

        self.state = BreakerState {
            line_start: begin,
            run_idx: begin.run_index,
            glyph_idx: begin.run_offset,
            x: N::ZERO,
            has_content: false,
        };
        let mut best: Option<Opportunity<N>> = None;

        while self.state.run_idx < self.caches.len() {
            let cache = &self.caches[self.state.run_idx];
            let glyph_count = cache.glyph_count();
            if self.state.glyph_idx >= glyph_count {
                self.state.run_idx += 1;
                self.state.glyph_idx = 0;
                continue;
            }

            // Run boundaries are always break opportunities. A style change inside a word
            // can therefore wrap the word.
            if self.state.glyph_idx == 0 && self.state.has_content {
                best = Some(Opportunity {
                    at: TextCursor::new(self.state.run_idx, 0),
                    width: self.state.x,
                    skip_space: cache.attr_of_glyph(0).is_whitespace,
                });
            }

            // Fast path: the rest of the run fits, so its break opportunities are not
            // examined.
            let run_rest = cache.width_of(self.state.glyph_idx..glyph_count);
            if self.state.x + run_rest <= max_advance {
                self.state.x += run_rest;
                self.state.has_content = true;
                self.state.run_idx += 1;
                self.state.glyph_idx = 0;
                continue;
            }

            while self.state.glyph_idx < glyph_count {
                let glyph = self.state.glyph_idx;
                let cluster_end = Self::cluster_end(cache, glyph);
                let attr = cache.attr_of_glyph(glyph);
                let advance = cache.width_of(glyph..cluster_end);
                let at = TextCursor::new(self.state.run_idx, glyph);

                // A soft break right after a recorded space would keep the space on the
                // line; breaking at the space is preferred.
                let after_space = best.is_some_and(|best| {
                    best.skip_space
                        && best.at.run_index == at.run_index
                        && Self::cluster_end(cache, best.at.run_offset) == glyph
                });
                if self.state.has_content
                    && glyph > 0
                    && (attr.is_whitespace || (attr.is_soft_break && !after_space))
                {
                    best = Some(Opportunity {
                        at,
                        width: self.state.x,
                        skip_space: attr.is_whitespace,
                    });
                }

                if self.state.x + advance > max_advance {
                    let line = if attr.is_whitespace && self.state.has_content {
                        // Hang the overflowing space.
                        self.commit(begin, at, self.state.x, true)
                    } else if let Some(best) = best {
                        self.commit(begin, best.at, best.width, best.skip_space)
                    } else if !self.state.has_content {
                        // Even a single cluster is too wide; take it and overflow.
                        let after = TextCursor::new(self.state.run_idx, cluster_end);
                        self.commit(begin, after, advance, false)
                    } else if self.break_words {
                        self.commit(begin, at, self.state.x, false)
                    } else {
                        self.overflow_to_next_opportunity(begin)
                    };
                    return Some(line);
                }

                self.state.x += advance;
                self.state.has_content = true;
                self.state.glyph_idx = cluster_end;
            }
            self.state.run_idx += 1;
            self.state.glyph_idx = 0;
        }

        // Rounding can let the scan finish without overflowing.
        self.done = true;
        Some(LineBreak {
            begin,
            end,
            width: self.state.x,
            skip_space: false,
        })
    }

    /// Extends the line past the limit until the next break opportunity. Used when a word
    /// is wider than the line and word breaking is off.
    fn overflow_to_next_opportunity(&mut self, begin: TextCursor) -> LineBreak<N> {
        let mut x = self.state.x;
        let mut run_idx = self.state.run_idx;
        let mut glyph = self.state.glyph_idx;
        while run_idx < self.caches.len() {
            let cache = &self.caches[run_idx];
            while glyph < cache.glyph_count() {
                let attr = cache.attr_of_glyph(glyph);
                let at_boundary = glyph == 0 && x > N::ZERO;
                if at_boundary || (glyph > 0 && (attr.is_whitespace || attr.is_soft_break)) {
                    let at = TextCursor::new(run_idx, glyph);
                    if at > TextCursor::new(self.state.run_idx, self.state.glyph_idx) {
                        return self.commit(begin, at, x, attr.is_whitespace);
                    }
                }
                let cluster_end = Self::cluster_end(cache, glyph);
                x += cache.width_of(glyph..cluster_end);
                glyph = cluster_end;
            }
            run_idx += 1;
            glyph = 0;
        }
        self.done = true;
        LineBreak {
            begin,
            end: self.end_cursor(),
            width: x,
            skip_space: false,
        }
    }

    fn commit(
        &mut self,
        begin: TextCursor,
        end: TextCursor,
        width: N,
        skip_space: bool,
    ) -> LineBreak<N> {
        let (end, next) = if skip_space {
            let cache = &self.caches[end.run_index];
            let next = TextCursor::new(end.run_index, Self::cluster_end(cache, end.run_offset));
            (end, self.normalize(next))
        } else {
            let end = self.normalize(end);
            (end, end)
        };
        self.state.line_start = next;
        LineBreak {
            begin,
            end,
            width,
            skip_space,
        }
    }

    /// Breaks all remaining lines.
    pub(crate) fn break_remaining(mut self) -> Vec<LineBreak<N>> {
        let mut lines = Vec::new();
        while let Some(line) = self.break_next() {
            lines.push(line);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::BreakLines;
    use crate::layout::TextCursor;
    use crate::{LogicalAttr, RunCache};

    /// A run of ASCII text where every character is `advance` wide.
    fn run(text: &str, advance: i32) -> RunCache<i32> {
        let count = text.chars().count();
        let mut cache = RunCache::new(vec![1; count], vec![advance; count]);
        let mut prev_space = false;
        let attrs = text
            .chars()
            .map(|ch| {
                let attr = LogicalAttr {
                    is_whitespace: ch == ' ',
                    is_soft_break: prev_space && ch != ' ',
                };
                prev_space = ch == ' ';
                attr
            })
            .collect();
        cache.complete(text, attrs, Vec::new(), false);
        cache
    }

    fn breaks(caches: &[RunCache<i32>], width: i32) -> Vec<(TextCursor, TextCursor, i32, bool)> {
        BreakLines::new(caches, Some(width), false)
            .break_remaining()
            .into_iter()
            .map(|line| (line.begin, line.end, line.width, line.skip_space))
            .collect()
    }

    #[test]
    fn fits_on_one_line() {
        let caches = [run("hello", 10)];
        let lines = breaks(&caches, 100);
        assert_eq!(
            lines,
            vec![(TextCursor::new(0, 0), TextCursor::new(1, 0), 50, false)]
        );
    }

    #[test]
    fn quick_brown_fox() {
        let caches = [run("The quick brown fox", 10)];
        let lines = breaks(&caches, 100);
        assert_eq!(lines.len(), 2);
        // The first line ends at the space before "brown", which is skipped.
        assert_eq!(lines[0], (TextCursor::new(0, 0), TextCursor::new(0, 9), 90, true));
        assert_eq!(lines[1].0, TextCursor::new(0, 10));
        assert_eq!(lines[1].2, 90);
    }

    #[test]
    fn overflowing_space_is_skipped() {
        let caches = [run("aaaa bbbb", 10)];
        let lines = breaks(&caches, 40);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            (TextCursor::new(0, 0), TextCursor::new(0, 4), 40, true)
        );
        // The next line starts after the skipped space.
        assert_eq!(lines[1].0, TextCursor::new(0, 5));
        assert_eq!(lines[1].2, 40);
    }

    #[test]
    fn unbreakable_word_overflows_whole() {
        let caches = [run("aaaaaaaaaa", 50)];
        let lines = breaks(&caches, 100);
        assert_eq!(
            lines,
            vec![(TextCursor::new(0, 0), TextCursor::new(1, 0), 500, false)]
        );
    }

    #[test]
    fn long_word_overflows_up_to_next_opportunity() {
        let caches = [run("aaaaaaaa bb", 10)];
        let lines = breaks(&caches, 50);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].1, TextCursor::new(0, 8));
        assert_eq!(lines[0].2, 80);
        assert!(lines[0].3);
        assert_eq!(lines[1].0, TextCursor::new(0, 9));
    }

    #[test]
    fn break_words_forces_a_break() {
        let caches = [run("aaaaaaa", 10)];
        let lines: Vec<_> = BreakLines::new(&caches, Some(30), true)
            .break_remaining()
            .into_iter()
            .map(|line| line.width)
            .collect();
        assert_eq!(lines, vec![30, 30, 10]);
    }

    #[test]
    fn a_glyph_wider_than_the_line_still_makes_progress() {
        let caches = [run("ab", 80)];
        let lines: Vec<_> = BreakLines::new(&caches, Some(50), true)
            .break_remaining()
            .into_iter()
            .map(|line| (line.end, line.width))
            .collect();
        assert_eq!(
            lines,
            vec![(TextCursor::new(0, 1), 80), (TextCursor::new(1, 0), 80)]
        );
    }

    #[test]
    fn style_boundary_inside_a_word_can_wrap() {
        // "abcdef" split into two runs by a style change.
        let caches = [run("abc", 10), run("def", 10)];
        let lines = breaks(&caches, 40);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].1, TextCursor::new(1, 0));
        assert_eq!(lines[0].2, 30);
    }

    #[test]
    fn no_wrap_keeps_one_line() {
        let caches = [run("The quick brown fox", 10)];
        let lines = BreakLines::new(&caches, None, false).break_remaining();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width, 190);
    }

    #[test]
    fn empty_paragraph_has_one_line() {
        let caches = [RunCache::<i32>::empty()];
        let lines = BreakLines::new(&caches, Some(10), false).break_remaining();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width, 0);
        assert_eq!(lines[0].end, TextCursor::new(1, 0));
    }

    #[test]
    fn trailing_hung_space_does_not_create_an_empty_line() {
        let caches = [run("aaaa ", 10)];
        let lines = breaks(&caches, 40);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].3);
    }
}
