//! Counted: pairs each element with its zero-based position.

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::Step;

pub struct Counted<S> {
    upstream: S,
    index: usize,
    next: usize,
}

impl<S> Counted<S> {
    pub fn new(upstream: S) -> Self {
        Self::starting_at(upstream, 0)
    }

    /// Number from `first` instead of zero. The index wraps on overflow.
    pub fn starting_at(upstream: S, first: usize) -> Self {
        Self {
            upstream,
            index: first,
            next: first,
        }
    }
}

impl<S: Step> Step for Counted<S> {
    type Item = (usize, S::Item);

    fn advance(&mut self) -> bool {
        if !self.upstream.advance() {
            return false;
        }
        self.index = self.next;
        self.next = self.next.wrapping_add(1);
        true
    }

    fn current(&self) -> Self::Item {
        (self.index, self.upstream.current())
    }

    fn measure(&self) -> SizeHint {
        self.upstream.measure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RepeatSource, SliceSource};
    use crate::testutil::drain;

    #[test]
    fn test_counted_indexes() {
        let data = ['a', 'b', 'c'];
        let got = drain(Counted::new(SliceSource::new(&data)));
        assert_eq!(got, vec![(0, &'a'), (1, &'b'), (2, &'c')]);
    }

    #[test]
    fn test_counted_wraps() {
        let got = drain(Counted::starting_at(RepeatSource::times((), 2), usize::MAX));
        assert_eq!(got, vec![(usize::MAX, ()), (0, ())]);
    }
}
