//! Leaf/fragment range intersection

use std::ops::Range;

/// Span of a fragment in the coordinate space of its tokenization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentBounds {
    pub start: usize,
    pub end: usize,
}

impl FragmentBounds {
    /// A fragment tokenized on its own
    pub fn whole(len: usize) -> Self {
        Self { start: 0, end: len }
    }

    /// A fragment inside a joined block
    ///
    /// `offset` is the fragment's position in the joined text and `gap`
    /// the number of separators before it.
    pub fn in_block(offset: usize, gap: usize, len: usize) -> Self {
        let start = offset.saturating_sub(gap);
        Self {
            start,
            end: start + len,
        }
    }

    /// Overlap of `[start, end)` with the fragment, fragment-relative
    pub fn intersect(&self, start: usize, end: usize) -> Option<Range<usize>> {
        let lo = start.max(self.start);
        let hi = end.min(self.end);
        if lo >= hi {
            return None;
        }
        Some(lo - self.start..hi - self.start)
    }
}
