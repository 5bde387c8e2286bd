//! Source location tracking for diagnostics.
//!
//! Provides [`Span`], the byte range a syntax node covers together with the
//! line it starts on. Spans are attached to diagnostics so that an external
//! renderer can point at the offending expression.

use std::fmt;

/// A byte range in a source file, plus the 1-indexed line it starts on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: u32,
    /// Byte offset one past the last character.
    pub end: u32,
    /// Line number of `start` (1-indexed).
    pub line: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub fn new(start: u32, end: u32, line: u32) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end, line }
    }

    /// Create a zero-length span at an offset.
    #[inline]
    pub fn point(offset: u32, line: u32) -> Self {
        Self {
            start: offset,
            end: offset,
            line,
        }
    }

    /// Whether this span covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// The smallest span covering both `self` and `other`.
    ///
    /// The line is taken from whichever span starts first.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        let (first, _) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: first.line,
        }
    }

    /// Whether `other` lies entirely inside this span.
    #[inline]
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}@{}", self.start, self.end, self.line)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} [{}..{}]", self.line, self.start, self.end)
    }
}
