//! Predicate-bounded prefixes and suffixes.
//!
//! One state machine covers three shapes:
//!
//! - `TakeWhile`: yield while the predicate holds, stop at the first element
//!   that fails it.
//! - `SkipUntil`: discard until the predicate first holds, then yield that
//!   element and everything after it.
//! - `TakeUntilFinal`: yield up to and including the first element for which
//!   the predicate holds.

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::{Step, StepState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UntilMode {
    TakeWhile,
    SkipUntil,
    TakeUntilFinal,
}

pub struct Until<S, P> {
    upstream: S,
    pred: P,
    mode: UntilMode,
    /// The predicate has already held once.
    matched: bool,
    state: StepState,
}

impl<S, P> Until<S, P>
where
    S: Step,
    P: FnMut(&S::Item) -> bool,
{
    pub fn new(upstream: S, pred: P, mode: UntilMode) -> Self {
        Self {
            upstream,
            pred,
            mode,
            matched: false,
            state: StepState::Fresh,
        }
    }

    fn upstream_matches(&mut self) -> bool {
        (self.pred)(&self.upstream.current())
    }

    fn skip_to_match(&mut self) -> bool {
        while self.upstream.advance() {
            if self.upstream_matches() {
                self.matched = true;
                return true;
            }
        }
        false
    }
}

impl<S, P> Step for Until<S, P>
where
    S: Step,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() {
            return false;
        }
        let advanced = match self.mode {
            UntilMode::TakeWhile => self.upstream.advance() && self.upstream_matches(),
            UntilMode::TakeUntilFinal => {
                if self.matched || !self.upstream.advance() {
                    false
                } else {
                    self.matched = self.upstream_matches();
                    true
                }
            }
            UntilMode::SkipUntil if self.matched => self.upstream.advance(),
            UntilMode::SkipUntil => self.skip_to_match(),
        };
        self.state.record(advanced)
    }

    fn current(&self) -> S::Item {
        self.state.ensure_active();
        self.upstream.current()
    }

    fn measure(&self) -> SizeHint {
        match self.mode {
            _ if self.state.is_exhausted() => SizeHint::exact(0),
            UntilMode::TakeUntilFinal if self.matched => SizeHint::exact(0),
            UntilMode::SkipUntil if self.matched => self.upstream.measure(),
            _ => self.upstream.measure().filtered(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RepeatSource, SliceSource};
    use crate::testutil::copied;

    fn run(data: &[i32], mode: UntilMode, pred: fn(&&i32) -> bool) -> Vec<i32> {
        copied(Until::new(SliceSource::new(data), pred, mode))
    }

    #[test]
    fn test_three_modes() {
        let data = [1, 3, 5, 6, 7, 8];
        let even = |x: &&i32| **x % 2 == 0;
        let odd = |x: &&i32| **x % 2 == 1;
        assert_eq!(run(&data, UntilMode::TakeWhile, odd), vec![1, 3, 5]);
        assert_eq!(run(&data, UntilMode::SkipUntil, even), vec![6, 7, 8]);
        assert_eq!(run(&data, UntilMode::TakeUntilFinal, even), vec![1, 3, 5, 6]);
    }

    #[test]
    fn test_no_match() {
        let data = [1, 3, 5];
        let even = |x: &&i32| **x % 2 == 0;
        let odd = |x: &&i32| **x % 2 == 1;
        assert_eq!(run(&data, UntilMode::TakeWhile, odd), data);
        assert_eq!(run(&data, UntilMode::TakeUntilFinal, even), data);
        assert!(run(&data, UntilMode::SkipUntil, even).is_empty());
    }

    #[test]
    fn test_skip_until_plus_take_while_complement_is_input() {
        let data = [4, 2, 9, 1, 7, 3];
        let big = |x: &&i32| **x > 5;
        let small = |x: &&i32| **x <= 5;
        let mut joined = run(&data, UntilMode::TakeWhile, small);
        joined.extend(run(&data, UntilMode::SkipUntil, big));
        assert_eq!(joined, data);
    }

    #[test]
    fn test_until_measures() {
        let data = [1, 2];
        let u = Until::new(SliceSource::new(&data), |_: &&i32| true, UntilMode::TakeWhile);
        assert_eq!(u.measure(), SizeHint::bounded(2));
        let inf = Until::new(RepeatSource::forever(1), |x: &i32| *x > 0, UntilMode::TakeWhile);
        assert!(inf.measure().is_unknown());

        let mut last = Until::new(
            SliceSource::new(&data),
            |_: &&i32| true,
            UntilMode::TakeUntilFinal,
        );
        assert!(last.advance());
        assert_eq!(last.measure(), SizeHint::exact(0));
        assert!(!last.advance());
    }
}
