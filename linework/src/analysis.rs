// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run building: analysis, visual reordering and shaping of a paragraph.

use alloc::vec;
use alloc::vec::Vec;

use crate::paragraph::Paragraph;
use crate::{Coord, RunCache, ShapingBackend, TextRun, TextSource};

/// Splits the paragraph into runs, reorders them visually and decides its direction.
///
/// A paragraph without runs is marked as dropped and takes no space in the layout.
pub(crate) fn analyse_paragraph<N, S, T, B>(
    paragraph: &mut Paragraph<N, S::Style, B>,
    text: &T,
    backend: &mut S,
) where
    N: Coord,
    S: ShapingBackend<N>,
    T: TextSource<Style = S::Style>,
{
    if paragraph.analysed {
        return;
    }
    paragraph.analysed = true;
    let runs = backend.analyse_rich_text(text, paragraph.range);
    debug_assert!(
        covers_range(&runs, paragraph.range.pos(), paragraph.range.end()),
        "analysed runs must tile the paragraph"
    );
    let runs = backend.layout_text_runs(runs);
    if runs.is_empty() {
        log::warn!(
            "paragraph {:?} produced no runs; dropping it from the layout",
            paragraph.range.as_range()
        );
        paragraph.dropped = true;
        return;
    }
    paragraph.is_rtl = is_mostly_rtl(&runs);
    paragraph.runs = runs;
}

/// Shapes every run of an analysed paragraph.
///
/// A run that fails to shape is retried once with the backend's fallback font; if that fails
/// too the run keeps its slot with an empty cache so cursor bookkeeping stays aligned.
pub(crate) fn shape_paragraph<N, S, T, B>(
    paragraph: &mut Paragraph<N, S::Style, B>,
    text: &T,
    backend: &mut S,
) where
    N: Coord,
    S: ShapingBackend<N>,
    T: TextSource<Style = S::Style>,
{
    analyse_paragraph(paragraph, text, backend);
    if paragraph.shaped || paragraph.dropped {
        return;
    }
    let source = text.text();
    let caches = paragraph
        .runs
        .iter()
        .map(|run| shape_run(run, source, backend))
        .collect();
    paragraph.caches = caches;
    paragraph.shaped = true;
}

fn shape_run<N, S>(run: &TextRun<S::Style>, text: &str, backend: &mut S) -> RunCache<N>
where
    N: Coord,
    S: ShapingBackend<N>,
{
    let run_text = text.get(run.range.as_range()).unwrap_or_default();
    if let Some(object) = run.inline_object {
        let metrics = backend.inline_object_metrics(object);
        let mut cache = RunCache::new(vec![0], vec![metrics.width]);
        let attrs = backend.run_logical_attributes(text, run);
        cache.complete(run_text, attrs, Vec::new(), false);
        return cache;
    }

    let mut cache = match backend.shape_and_position_run(text, run, false) {
        Ok(cache) => cache,
        Err(err) => {
            log::warn!("{err}; retrying with the fallback font");
            backend
                .shape_and_position_run(text, run, true)
                .unwrap_or_else(|err| {
                    log::warn!("{err}; the run is laid out with zero width");
                    RunCache::empty()
                })
        }
    };
    let attrs = backend.run_logical_attributes(text, run);
    let glyph_to_char = if run.is_complex {
        backend.map_glyphs_to_chars(run, &cache)
    } else {
        Vec::new()
    };
    cache.complete(run_text, attrs, glyph_to_char, run.is_complex);
    cache
}

/// Majority vote over run lengths: the paragraph is right-to-left when more of its text sits
/// in right-to-left runs than in left-to-right ones.
fn is_mostly_rtl<S>(runs: &[TextRun<S>]) -> bool {
    let (rtl, ltr) = runs.iter().fold((0, 0), |(rtl, ltr), run| {
        if run.is_rtl() {
            (rtl + run.range.length(), ltr)
        } else {
            (rtl, ltr + run.range.length())
        }
    });
    rtl > ltr
}

fn covers_range<S>(runs: &[TextRun<S>], start: usize, end: usize) -> bool {
    let mut pos = start;
    for run in runs {
        if run.range.pos() != pos {
            return false;
        }
        pos = run.range.end();
    }
    runs.is_empty() || pos == end
}
