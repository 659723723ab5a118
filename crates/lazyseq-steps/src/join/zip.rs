//! Zip: pairs elements of two sequences, ending with the shorter one.

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::{Step, StepState};

pub struct Zip<A, B> {
    left: A,
    right: B,
    state: StepState,
}

impl<A, B> Zip<A, B> {
    pub fn new(left: A, right: B) -> Self {
        Self {
            left,
            right,
            state: StepState::Fresh,
        }
    }
}

impl<A: Step, B: Step> Step for Zip<A, B> {
    type Item = (A::Item, B::Item);

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() {
            return false;
        }
        let advanced = self.left.advance() && self.right.advance();
        self.state.record(advanced)
    }

    fn current(&self) -> Self::Item {
        self.state.ensure_active();
        (self.left.current(), self.right.current())
    }

    fn measure(&self) -> SizeHint {
        if self.state.is_exhausted() {
            return SizeHint::exact(0);
        }
        self.left.measure().limit(self.right.measure())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RangeSource, SliceSource, Successors};
    use crate::testutil::drain;

    #[test]
    fn test_zip_stops_at_shorter() {
        let names = ["a", "b", "c"];
        let z = Zip::new(SliceSource::new(&names), RangeSource::new(1, 2, 1));
        assert_eq!(z.measure(), SizeHint::exact(2));
        assert_eq!(drain(z), vec![(&"a", 1), (&"b", 2)]);
    }

    #[test]
    fn test_zip_with_unbounded_takes_other_hint() {
        let data = [1.5, 2.5];
        let z = Zip::new(SliceSource::new(&data), Successors::new(0u32, |n: &u32| n + 1));
        assert_eq!(z.measure(), SizeHint::exact(2));
        assert_eq!(drain(z).len(), 2);
    }
}
