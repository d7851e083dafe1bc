// Copyright 2026 the Linework Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error type for range validation and shaping backends.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the byte range that was being processed and
/// the length of the text at the time of failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The start byte offset of the range involved.
    start: usize,

    /// The end byte offset (exclusive) of the range involved.
    end: usize,

    /// The length in bytes of the underlying text at the time of failure.
    len: usize,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports source text length context; an `is_empty` method would be misleading and unused."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The start byte offset of the range involved.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end byte offset of the range involved.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length in bytes of the underlying text at the time of the error.
    pub fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn invalid_bounds(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidBounds, start, end, len)
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidRange, start, end, len)
    }

    pub(crate) fn not_on_char_boundary(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::NotOnCharBoundary, start, end, len)
    }

    /// Reports that a backend could not shape the text in `start..end`.
    pub fn shaping_failed(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::ShapingFailed, start, end, len)
    }

    /// Reports that the selected font has no glyphs for the text in `start..end`.
    pub fn missing_glyphs(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::MissingGlyphs, start, end, len)
    }

    fn new(kind: ErrorKind, start: usize, end: usize, len: usize) -> Self {
        Self {
            kind,
            start,
            end,
            len,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidBounds => write!(
                f,
                "range {}..{} out of bounds for len {}",
                self.start, self.end, self.len
            ),
            ErrorKind::InvalidRange => {
                write!(f, "invalid range {}..{}: start > end", self.start, self.end)
            }
            ErrorKind::NotOnCharBoundary => write!(
                f,
                "range {}..{} not on UTF-8 boundary",
                self.start, self.end
            ),
            ErrorKind::ShapingFailed => {
                write!(f, "shaping failed for {}..{}", self.start, self.end)
            }
            ErrorKind::MissingGlyphs => {
                write!(f, "no glyphs available for {}..{}", self.start, self.end)
            }
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Provided range offsets were out of bounds relative to the text length.
    InvalidBounds,

    /// The provided range ended before it started.
    InvalidRange,

    /// Either endpoint was not aligned to a UTF-8 character boundary.
    NotOnCharBoundary,

    /// The shaping backend failed to produce output for a run.
    ShapingFailed,

    /// The font chosen for a run has no glyphs for its characters.
    MissingGlyphs,
}
