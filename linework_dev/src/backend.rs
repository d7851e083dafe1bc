// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use unicode_bidi::BidiInfo;
use unicode_segmentation::UnicodeSegmentation;

use linework::{
    Coord, Error, GlyphId, GlyphOffset, InlineObjectId, InlineObjectMetrics,
    JustificationClass, LogicalAttr, RunCache, ShapingBackend, StyleMetrics, TextRange,
    TextRun, TextSource,
};

use crate::{Rect, TextStyle, OBJECT_REPLACEMENT};

/// How a style fails to shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Failure {
    /// The primary font fails; the fallback font works.
    Primary,
    /// Both fonts fail.
    Always,
    /// Analysis of a paragraph starting in the style yields no runs.
    Analysis,
}

/// A deterministic shaper with monospaced fonts.
///
/// Every cluster advances by the advance of its style. Latin text is shaped one glyph per
/// character. Anything else is treated as a complex script: one glyph per character with a
/// cluster map grouping each grapheme, where only the first glyph of a grapheme advances and
/// combining marks are offset back over their base.
///
/// The primary font has no glyphs for the private use area; the fallback font shapes those
/// characters as glyph 0. Inline objects get their size from the table kept by the backend.
#[derive(Clone, Debug, Default)]
pub struct MonoBackend {
    objects: Vec<(u32, u32)>,
    failures: Vec<(TextStyle, Failure)>,
    shaped_runs: usize,
}

impl MonoBackend {
    /// Creates a backend with no inline objects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an inline object of the given size.
    pub fn add_object(&mut self, width: u32, height: u32) -> InlineObjectId {
        let id = InlineObjectId(self.objects.len() as u32);
        self.objects.push((width, height));
        id
    }

    /// Makes the primary font of `style` fail, so runs of it are shaped with the fallback.
    pub fn fail_primary(&mut self, style: TextStyle) {
        self.failures.push((style, Failure::Primary));
    }

    /// Makes every font of `style` fail, so runs of it cannot be shaped.
    pub fn fail_always(&mut self, style: TextStyle) {
        self.failures.push((style, Failure::Always));
    }

    /// Makes analysis return no runs for paragraphs that start in `style`.
    pub fn fail_analysis(&mut self, style: TextStyle) {
        self.failures.push((style, Failure::Analysis));
    }

    /// Number of runs shaped successfully so far.
    pub fn shaped_runs(&self) -> usize {
        self.shaped_runs
    }

    fn failure(&self, style: &TextStyle) -> Option<Failure> {
        self.failures
            .iter()
            .rev()
            .find(|(failing, failure)| failing == style && *failure != Failure::Analysis)
            .map(|(_, failure)| *failure)
    }

    fn fails_analysis(&self, style: &TextStyle) -> bool {
        self.failures.contains(&(*style, Failure::Analysis))
    }
}

fn is_private_use(ch: char) -> bool {
    matches!(ch as u32, 0xe000..=0xf8ff)
}

fn glyph_id(ch: char, use_fallback: bool) -> GlyphId {
    if use_fallback && is_private_use(ch) {
        0
    } else {
        u32::from(ch)
    }
}

/// Graphemes outside Latin script are shaped as a complex script.
fn is_complex_grapheme(grapheme: &str) -> bool {
    let mut chars = grapheme.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => ch as u32 >= 0x250 && ch != OBJECT_REPLACEMENT,
        _ => true,
    }
}

fn is_ideograph(ch: char) -> bool {
    matches!(ch as u32, 0x3040..=0x30ff | 0x3400..=0x4dbf | 0x4e00..=0x9fff)
}

fn justification_class(ch: char) -> JustificationClass {
    if ch.is_whitespace() {
        JustificationClass::Whitespace
    } else if ch == '\u{640}' {
        JustificationClass::KashidaBlank
    } else if is_ideograph(ch) {
        JustificationClass::Character
    } else {
        JustificationClass::None
    }
}

#[derive(Clone, Copy, PartialEq)]
struct RunKey {
    style: TextStyle,
    level: u8,
    complex: bool,
    /// Position of the object placeholder, so adjacent objects get runs of their own.
    object: Option<(usize, InlineObjectId)>,
}

impl<N: Coord> ShapingBackend<N> for MonoBackend {
    type Style = TextStyle;
    type Region = Vec<Rect<N>>;

    fn analyse_rich_text<T: TextSource<Style = TextStyle>>(
        &mut self,
        text: &T,
        range: TextRange,
    ) -> Vec<TextRun<TextStyle>> {
        let (first_style, _) = text.style_run(range.pos());
        if self.fails_analysis(&first_style) {
            log::debug!("no runs for paragraph {:?}", range.as_range());
            return Vec::new();
        }
        let paragraph = text.text().get(range.as_range()).unwrap_or_default();
        if paragraph.is_empty() {
            return vec![TextRun::new(range, first_style)];
        }
        let bidi = BidiInfo::new(paragraph, None);
        let mut runs = Vec::new();
        let mut current: Option<(usize, RunKey)> = None;
        let mut complex = false;
        let mut previous_level = None;
        for (offset, grapheme) in paragraph.grapheme_indices(true) {
            let pos = range.pos() + offset;
            let object = text.inline_object(pos).map(|object| (pos, object));
            let level = bidi.levels[offset].number();
            let first = grapheme.chars().next().unwrap_or_default();
            if object.is_some() {
                complex = false;
            } else if !first.is_ascii() || first.is_ascii_alphanumeric() {
                complex = is_complex_grapheme(grapheme);
            } else {
                // Spaces and punctuation join a complex run of the same direction.
                complex = complex && previous_level == Some(level);
            }
            previous_level = Some(level);
            let key = RunKey {
                style: text.style_run(pos).0,
                level,
                complex,
                object,
            };
            match current {
                Some((_, current_key)) if current_key == key && object.is_none() => {}
                Some((start, current_key)) => {
                    runs.push(make_run(start, pos, current_key));
                    current = Some((pos, key));
                }
                None => current = Some((pos, key)),
            }
        }
        if let Some((start, key)) = current {
            runs.push(make_run(start, range.end(), key));
        }
        runs
    }

    fn shape_and_position_run(
        &mut self,
        text: &str,
        run: &TextRun<TextStyle>,
        use_fallback: bool,
    ) -> Result<RunCache<N>, Error> {
        let range = run.range;
        match self.failure(&run.style) {
            Some(Failure::Always) => {
                log::debug!("no font can shape {:?}", range.as_range());
                return Err(Error::shaping_failed(range.pos(), range.end(), text.len()));
            }
            Some(Failure::Primary) if !use_fallback => {
                log::debug!("primary font cannot shape {:?}", range.as_range());
                return Err(Error::shaping_failed(range.pos(), range.end(), text.len()));
            }
            _ => {}
        }
        let run_text = text.get(range.as_range()).unwrap_or_default();
        if !use_fallback && run_text.chars().any(is_private_use) {
            log::debug!("primary font has no glyphs for {:?}", range.as_range());
            return Err(Error::missing_glyphs(range.pos(), range.end(), text.len()));
        }
        let advance = N::from_count(run.style.advance as usize);
        self.shaped_runs += 1;
        if !run.is_complex {
            let glyphs: Vec<GlyphId> = run_text
                .chars()
                .map(|ch| glyph_id(ch, use_fallback))
                .collect();
            let advances = vec![advance; glyphs.len()];
            return Ok(RunCache::new(glyphs, advances));
        }
        let mut glyphs = Vec::new();
        let mut advances = Vec::new();
        let mut clusters = Vec::new();
        let mut classes = Vec::new();
        let mut offsets = Vec::new();
        let mut has_marks = false;
        let mut char_index = 0;
        for grapheme in run_text.graphemes(true) {
            let cluster = char_index;
            for (i, ch) in grapheme.chars().enumerate() {
                glyphs.push(glyph_id(ch, use_fallback));
                clusters.push(cluster);
                if i == 0 {
                    advances.push(advance);
                    classes.push(justification_class(ch));
                    offsets.push(GlyphOffset::default());
                } else {
                    // Marks sit over the middle of their base.
                    advances.push(N::ZERO);
                    classes.push(JustificationClass::None);
                    offsets.push(GlyphOffset {
                        dx: N::ZERO - advance.half(),
                        dy: N::ZERO,
                    });
                    has_marks = true;
                }
                char_index += 1;
            }
        }
        let cache = RunCache::new(glyphs, advances)
            .with_clusters(clusters)
            .with_justification(classes);
        Ok(if has_marks {
            cache.with_offsets(offsets)
        } else {
            cache
        })
    }

    fn style_metrics(&mut self, style: &TextStyle) -> StyleMetrics<N> {
        StyleMetrics {
            line_height: N::from_count(style.line_height as usize),
            ascent: N::from_count(style.ascent as usize),
        }
    }

    fn inline_object_metrics(&mut self, object: InlineObjectId) -> InlineObjectMetrics<N> {
        let (width, height) = self
            .objects
            .get(object.0 as usize)
            .copied()
            .unwrap_or_default();
        InlineObjectMetrics {
            width: N::from_count(width as usize),
            height: N::from_count(height as usize),
        }
    }

    fn run_logical_attributes(
        &mut self,
        text: &str,
        run: &TextRun<TextStyle>,
    ) -> Vec<LogicalAttr> {
        let start = run.range.pos();
        let mut previous = text.get(..start).and_then(|before| before.chars().next_back());
        let run_text = text.get(run.range.as_range()).unwrap_or_default();
        let mut attrs = Vec::with_capacity(run_text.len());
        for ch in run_text.chars() {
            let is_soft_break = !is_mark(ch)
                && !ch.is_whitespace()
                && previous.is_some_and(|prev| {
                    prev.is_whitespace()
                        || prev == '-'
                        || is_ideograph(ch)
                        || is_ideograph(prev)
                        || ch == OBJECT_REPLACEMENT
                        || prev == OBJECT_REPLACEMENT
                });
            attrs.push(LogicalAttr {
                is_whitespace: ch.is_whitespace(),
                is_soft_break,
            });
            previous = Some(ch);
        }
        attrs
    }

    fn create_region_from_points(&mut self, x1: N, y1: N, x2: N, y2: N) -> Vec<Rect<N>> {
        vec![Rect::new(x1, y1, x2, y2)]
    }

    fn union_region(&mut self, region: &mut Vec<Rect<N>>, other: Vec<Rect<N>>) {
        region.extend(other);
    }
}

/// Combining marks never start a cluster.
fn is_mark(ch: char) -> bool {
    matches!(ch as u32, 0x300..=0x36f | 0x591..=0x5bd | 0x64b..=0x65f | 0x670)
}

fn make_run(start: usize, end: usize, key: RunKey) -> TextRun<TextStyle> {
    let mut run = TextRun::new(TextRange::new_unchecked(start, end - start), key.style);
    run.bidi_level = key.level;
    run.is_complex = key.complex;
    run.inline_object = key.object.map(|(_, object)| object);
    run
}
