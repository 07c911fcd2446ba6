//! Port for choosing among canned replies.
//!
//! Kept behind a trait so tests can pin which fallback line is returned.

/// Source of uniformly distributed indices.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Deterministic source that always yields the same index, clamped to range.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedRandomSource(pub usize);

impl RandomSource for FixedRandomSource {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}
