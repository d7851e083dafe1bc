// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric coordinate types.

use core::fmt::Debug;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// A numeric type used for layout coordinates and advances.
///
/// Bitmap backends that snap to device pixels use `i32`, while resolution independent
/// backends use `f32` or `f64`. The engine only needs addition, subtraction, ordering and
/// a way to split a distance into equal shares.
pub trait Coord:
    Copy
    + Default
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + Sum<Self>
{
    /// The additive identity.
    const ZERO: Self;

    /// The largest representable value, used as an "unbounded" width.
    const MAX: Self;

    /// Returns half of `self`.
    fn half(self) -> Self;

    /// Returns the share of `self` that each of `parts` receives when it is split evenly.
    ///
    /// Integer coordinates round up so that distributing the share never falls short of
    /// `self`; callers are expected to cap the final share.
    fn share(self, parts: usize) -> Self;

    /// Converts a count into a coordinate.
    fn from_count(count: usize) -> Self;

    /// Returns the larger of two coordinates.
    fn max_of(self, other: Self) -> Self {
        if other > self { other } else { self }
    }

    /// Returns the smaller of two coordinates.
    fn min_of(self, other: Self) -> Self {
        if other < self { other } else { self }
    }
}

/// A point in layout coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point<N> {
    /// Horizontal position, growing to the right.
    pub x: N,
    /// Vertical position, growing downwards.
    pub y: N,
}

impl<N> Point<N> {
    /// Creates a point.
    pub const fn new(x: N, y: N) -> Self {
        Self { x, y }
    }
}

impl Coord for i32 {
    const ZERO: Self = 0;
    const MAX: Self = Self::MAX;

    fn half(self) -> Self {
        self / 2
    }

    fn share(self, parts: usize) -> Self {
        if parts == 0 {
            return 0;
        }
        let parts = Self::from_count(parts);
        if self >= 0 {
            (self + parts - 1) / parts
        } else {
            self / parts
        }
    }

    fn from_count(count: usize) -> Self {
        Self::try_from(count).unwrap_or(Self::MAX)
    }
}

impl Coord for f32 {
    const ZERO: Self = 0.0;
    const MAX: Self = Self::MAX;

    fn half(self) -> Self {
        self * 0.5
    }

    fn share(self, parts: usize) -> Self {
        if parts == 0 {
            return 0.0;
        }
        self / Self::from_count(parts)
    }

    fn from_count(count: usize) -> Self {
        count as Self
    }
}

impl Coord for f64 {
    const ZERO: Self = 0.0;
    const MAX: Self = Self::MAX;

    fn half(self) -> Self {
        self * 0.5
    }

    fn share(self, parts: usize) -> Self {
        if parts == 0 {
            return 0.0;
        }
        self / Self::from_count(parts)
    }

    fn from_count(count: usize) -> Self {
        count as Self
    }
}
