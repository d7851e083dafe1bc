// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shaping backend interface and the shaped data it produces.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use unicode_bidi::{BidiInfo, Level};

use crate::{Coord, Error, InlineObjectId, TextRange, TextSource};

/// Identifier of a glyph in a font.
pub type GlyphId = u32;

/// A sub-range of a paragraph sharing style and script properties.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun<S> {
    /// The text covered by the run.
    pub range: TextRange,
    /// The style shared by the run.
    pub style: S,
    /// The inline object occupying the run, if this run is an object placeholder.
    pub inline_object: Option<InlineObjectId>,
    /// Whether the run needs complex script handling (cluster maps, justification classes).
    pub is_complex: bool,
    /// The bidi embedding level. Odd levels are right-to-left.
    pub bidi_level: u8,
}

impl<S> TextRun<S> {
    /// Creates a left-to-right text run.
    pub fn new(range: TextRange, style: S) -> Self {
        Self {
            range,
            style,
            inline_object: None,
            is_complex: false,
            bidi_level: 0,
        }
    }

    /// Returns `true` if the run is right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.bidi_level & 1 != 0
    }

    /// Returns `true` if the run is an inline object placeholder.
    pub fn is_inline_object(&self) -> bool {
        self.inline_object.is_some()
    }
}

/// Per-character flags used to find word wrap points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogicalAttr {
    /// The character is whitespace.
    pub is_whitespace: bool,
    /// A line may be broken immediately before the character.
    pub is_soft_break: bool,
}

/// How a glyph takes part in justification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JustificationClass {
    /// The glyph must not be stretched.
    #[default]
    None,
    /// Inter-word whitespace.
    Whitespace,
    /// A glyph that may be stretched in scripts that justify between characters.
    Character,
    /// A blank produced for kashida elongation. It is already a justification artifact and
    /// is never stretched again.
    KashidaBlank,
}

impl JustificationClass {
    /// Returns `true` if extra space may be added to a glyph of this class.
    pub fn is_opportunity(self) -> bool {
        matches!(self, Self::Whitespace | Self::Character)
    }
}

/// Vertical metrics of a style.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleMetrics<N> {
    /// Distance between consecutive baselines.
    pub line_height: N,
    /// Distance from the top of the line to the baseline.
    pub ascent: N,
}

/// Size of an inline object.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InlineObjectMetrics<N> {
    /// Horizontal extent.
    pub width: N,
    /// Vertical extent. Objects sit on the baseline.
    pub height: N,
}

/// Positioning offset of a glyph relative to its pen position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphOffset<N> {
    /// Horizontal offset.
    pub dx: N,
    /// Vertical offset.
    pub dy: N,
}

/// Shaped output of one run.
///
/// Glyphs are stored in logical order. Backends fill the glyph arrays; the engine completes
/// the cache with the logical attributes, the glyph to character map and the total width.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunCache<N> {
    glyphs: Vec<GlyphId>,
    advances: Vec<N>,
    offsets: Vec<GlyphOffset<N>>,
    clusters: Vec<usize>,
    justification: Vec<JustificationClass>,
    width: N,
    attrs: Vec<LogicalAttr>,
    char_offsets: Vec<usize>,
    glyph_to_char: Vec<usize>,
}

impl<N: Coord> RunCache<N> {
    /// Creates a run cache from glyphs and their advances.
    ///
    /// `advances` must have one entry per glyph.
    pub fn new(glyphs: Vec<GlyphId>, advances: Vec<N>) -> Self {
        let width = advances.iter().copied().sum();
        Self {
            glyphs,
            advances,
            width,
            ..Self::default()
        }
    }

    /// Creates an empty cache. Runs that could not be shaped keep their place in the run
    /// sequence with this cache, which has no glyphs and zero width.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets the per-glyph positioning offsets.
    #[must_use]
    pub fn with_offsets(mut self, offsets: Vec<GlyphOffset<N>>) -> Self {
        self.offsets = offsets;
        self
    }

    /// Sets the cluster map: for each glyph, the index of the first character of its
    /// cluster, counted in characters from the start of the run.
    #[must_use]
    pub fn with_clusters(mut self, clusters: Vec<usize>) -> Self {
        self.clusters = clusters;
        self
    }

    /// Sets the justification class of each glyph.
    #[must_use]
    pub fn with_justification(mut self, classes: Vec<JustificationClass>) -> Self {
        self.justification = classes;
        self
    }

    /// Glyph identifiers in logical order.
    pub fn glyphs(&self) -> &[GlyphId] {
        &self.glyphs
    }

    /// Per-glyph advances.
    pub fn advances(&self) -> &[N] {
        &self.advances
    }

    /// Per-glyph offsets. May be empty when the backend does not position glyphs.
    pub fn offsets(&self) -> &[GlyphOffset<N>] {
        &self.offsets
    }

    /// The cluster map as reported by the backend.
    pub fn clusters(&self) -> &[usize] {
        &self.clusters
    }

    /// Per-glyph justification classes as reported by the backend.
    pub fn justification(&self) -> &[JustificationClass] {
        &self.justification
    }

    /// Sum of all advances.
    pub fn width(&self) -> N {
        self.width
    }

    /// Number of glyphs.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Logical attributes, one per character of the run.
    pub fn logical_attributes(&self) -> &[LogicalAttr] {
        &self.attrs
    }

    /// The validated glyph to character map used by the engine.
    pub fn glyph_to_char(&self) -> &[usize] {
        &self.glyph_to_char
    }

    /// Sum of the advances of `glyphs`.
    pub(crate) fn width_of(&self, glyphs: core::ops::Range<usize>) -> N {
        let end = glyphs.end.min(self.advances.len());
        let start = glyphs.start.min(end);
        if start == 0 && end == self.advances.len() {
            return self.width;
        }
        self.advances[start..end].iter().copied().sum()
    }

    /// The character index (within the run) of the cluster that `glyph` belongs to.
    pub(crate) fn char_of_glyph(&self, glyph: usize) -> usize {
        self.glyph_to_char.get(glyph).copied().unwrap_or(0)
    }

    /// Logical attributes of the character that `glyph` maps to.
    pub(crate) fn attr_of_glyph(&self, glyph: usize) -> LogicalAttr {
        self.attrs
            .get(self.char_of_glyph(glyph))
            .copied()
            .unwrap_or_default()
    }

    /// Byte offset (relative to the run start) of the character at `char_index`.
    pub(crate) fn char_byte_offset(&self, char_index: usize) -> usize {
        self.char_offsets.get(char_index).copied().unwrap_or(0)
    }

    /// Index of the character containing the byte offset `relative` (relative to the run
    /// start).
    pub(crate) fn char_at_byte(&self, relative: usize) -> usize {
        self.char_offsets
            .partition_point(|&offset| offset <= relative)
            .saturating_sub(1)
    }

    /// Returns `true` if `glyph` starts a new cluster.
    pub(crate) fn is_cluster_start(&self, glyph: usize) -> bool {
        glyph == 0 || self.char_of_glyph(glyph) != self.char_of_glyph(glyph - 1)
    }

    /// Returns the first glyph whose cluster contains the character at `char_index`.
    pub(crate) fn glyph_of_char(&self, char_index: usize) -> usize {
        let mut best = 0;
        let mut best_char = None;
        for (glyph, &ch) in self.glyph_to_char.iter().enumerate() {
            if ch > char_index {
                break;
            }
            if best_char != Some(ch) {
                best = glyph;
                best_char = Some(ch);
            }
        }
        best
    }

    /// Completes the cache with engine-side data. Contract violations are repaired so the
    /// rest of the engine can index freely.
    pub(crate) fn complete(
        &mut self,
        run_text: &str,
        attrs: Vec<LogicalAttr>,
        glyph_to_char: Vec<usize>,
        is_complex: bool,
    ) {
        let glyph_count = self.glyphs.len();
        debug_assert_eq!(
            self.advances.len(),
            glyph_count,
            "advances must have one entry per glyph"
        );
        if self.advances.len() != glyph_count {
            log::warn!(
                "run cache has {} advances for {} glyphs",
                self.advances.len(),
                glyph_count
            );
            self.advances.resize(glyph_count, N::ZERO);
        }
        if !self.offsets.is_empty() && self.offsets.len() != glyph_count {
            self.offsets.resize(glyph_count, GlyphOffset::default());
        }
        self.width = self.advances.iter().copied().sum();

        self.char_offsets = run_text.char_indices().map(|(offset, _)| offset).collect();
        let char_count = self.char_offsets.len();
        self.attrs = attrs;
        if self.attrs.len() != char_count {
            log::warn!(
                "backend reported {} logical attributes for {} characters",
                self.attrs.len(),
                char_count
            );
            self.attrs.resize(char_count, LogicalAttr::default());
        }

        self.glyph_to_char = if is_complex {
            let valid = glyph_to_char.len() == glyph_count
                && glyph_to_char.iter().all(|&ch| ch < char_count.max(1))
                && glyph_to_char.windows(2).all(|pair| pair[0] <= pair[1]);
            debug_assert!(valid, "malformed cluster map");
            if valid {
                glyph_to_char
            } else {
                log::warn!("malformed cluster map; mapping every glyph to the first character");
                vec![0; glyph_count]
            }
        } else {
            let last = char_count.saturating_sub(1);
            (0..glyph_count).map(|glyph| glyph.min(last)).collect()
        };
    }
}

/// Reorders runs from logical to visual order using their bidi levels.
///
/// This is the default implementation of [`ShapingBackend::layout_text_runs`].
pub fn reorder_runs<S>(runs: Vec<TextRun<S>>) -> Vec<TextRun<S>> {
    if runs.iter().all(|run| run.bidi_level == 0) {
        return runs;
    }
    let levels: Vec<Level> = runs
        .iter()
        .map(|run| Level::new(run.bidi_level).unwrap_or_else(|_| Level::ltr()))
        .collect();
    let order = BidiInfo::reorder_visual(&levels);
    let mut slots: Vec<Option<TextRun<S>>> = runs.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|logical| slots.get_mut(logical).and_then(Option::take))
        .collect()
}

/// A text shaping service.
///
/// The engine never shapes text or reads fonts itself; it asks the backend to split text into
/// runs, shape them and report metrics. `N` is the coordinate type the backend measures in.
pub trait ShapingBackend<N: Coord> {
    /// Style type; must match the [`TextSource::Style`] of the buffer being laid out.
    type Style: Clone + Eq + Hash + Debug;

    /// Opaque region type produced for hit regions.
    type Region;

    /// Splits `range` of the buffer into runs of uniform style and script, in logical order.
    fn analyse_rich_text<T: TextSource<Style = Self::Style>>(
        &mut self,
        text: &T,
        range: TextRange,
    ) -> Vec<TextRun<Self::Style>>;

    /// Reorders logical-order runs into visual order.
    fn layout_text_runs(&mut self, runs: Vec<TextRun<Self::Style>>) -> Vec<TextRun<Self::Style>> {
        reorder_runs(runs)
    }

    /// Shapes a run. `text` is the whole buffer; the run covers `run.range` of it.
    ///
    /// When the first attempt fails the engine retries once with `use_fallback` set, which
    /// asks the backend to use its fallback font.
    fn shape_and_position_run(
        &mut self,
        text: &str,
        run: &TextRun<Self::Style>,
        use_fallback: bool,
    ) -> Result<RunCache<N>, Error>;

    /// Returns the line height and ascent of a style.
    fn style_metrics(&mut self, style: &Self::Style) -> StyleMetrics<N>;

    /// Returns the size of an inline object.
    fn inline_object_metrics(&mut self, object: InlineObjectId) -> InlineObjectMetrics<N>;

    /// Returns the logical attributes of each character of the run.
    fn run_logical_attributes(
        &mut self,
        text: &str,
        run: &TextRun<Self::Style>,
    ) -> Vec<LogicalAttr>;

    /// Returns, for each glyph of a shaped complex run, the index of its cluster's first
    /// character relative to the run start.
    fn map_glyphs_to_chars(
        &mut self,
        run: &TextRun<Self::Style>,
        cache: &RunCache<N>,
    ) -> Vec<usize> {
        let _ = run;
        cache.clusters().to_vec()
    }

    /// Returns the justification class of a glyph of a complex run.
    fn char_justification_class(&self, cache: &RunCache<N>, glyph: usize) -> JustificationClass {
        cache.justification().get(glyph).copied().unwrap_or_default()
    }

    /// Creates a rectangular region from two corner points.
    fn create_region_from_points(&mut self, x1: N, y1: N, x2: N, y2: N) -> Self::Region;

    /// Merges `other` into `region`.
    fn union_region(&mut self, region: &mut Self::Region, other: Self::Region);
}
