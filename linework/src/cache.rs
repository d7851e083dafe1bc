// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style metrics cache.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::{Coord, ShapingBackend, StyleMetrics};

/// Memoizes style metrics reported by a shaping backend.
///
/// A cache is handed to a layout when it is created and can be taken back with
/// [`TextLayout::into_parts`](crate::TextLayout::into_parts), so several layouts of one
/// session can share the lookups without any process-wide state.
#[derive(Clone)]
pub struct MetricsCache<N, S> {
    metrics: HashMap<S, StyleMetrics<N>>,
    hits: u64,
    misses: u64,
}

impl<N: Coord, S: Clone + Eq + Hash + Debug> MetricsCache<N, S> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            metrics: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the metrics of `style`, asking `backend` on a miss.
    pub fn style_metrics<B>(&mut self, backend: &mut B, style: &S) -> StyleMetrics<N>
    where
        B: ShapingBackend<N, Style = S>,
    {
        if let Some(metrics) = self.metrics.get(style) {
            self.hits += 1;
            return *metrics;
        }
        self.misses += 1;
        let metrics = backend.style_metrics(style);
        self.metrics.insert(style.clone(), metrics);
        metrics
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups forwarded to the backend.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of cached styles.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Returns `true` if no style has been cached.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Drops every cached entry, for example after the backend's fonts changed.
    pub fn clear(&mut self) {
        self.metrics.clear();
    }
}

impl<N: Coord, S: Clone + Eq + Hash + Debug> Default for MetricsCache<N, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Debug, S: Debug> Debug for MetricsCache<N, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MetricsCache")
            .field("len", &self.metrics.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish_non_exhaustive()
    }
}
