//! Source location spans.
//!
//! Compact 8-byte byte ranges attached to every node. Folding never
//! inspects spans; they exist for parse diagnostics and for keeping a
//! copied literal pointed at the text it came from.

use std::fmt;

/// Source location span.
///
/// - start: u32 - byte offset from file start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }

    /// One-based `(line, column)` of the span start within `source`.
    ///
    /// Columns count characters, not bytes. Offsets past the end of
    /// `source` clamp to the last position.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let mut offset = (self.start as usize).min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let merged = Span::new(10, 20).merge(Span::new(15, 30));
        assert_eq!(merged, Span::new(10, 30));
    }

    #[test]
    fn test_span_line_col() {
        let source = "class A {\n  int x = (7);\n}";
        let offset = u32::try_from(source.find('(').unwrap_or(0)).unwrap_or(0);
        assert_eq!(Span::new(offset, offset).line_col(source), (2, 11));
        assert_eq!(Span::DUMMY.line_col(source), (1, 1));
    }

    #[test]
    fn test_span_line_col_clamps() {
        assert_eq!(Span::new(500, 501).line_col("ab\nc"), (2, 2));
    }
}
