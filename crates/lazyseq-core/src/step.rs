//! The pull-based step interface.
//!
//! A step is one position in one execution of a pipeline. Consumers call
//! `advance()` until it returns false, reading `current()` in between.
//! Steps own their upstream steps by value, so a whole pipeline is a single
//! nested value that can be dropped at any time.

use crate::error::{usage_violation, UsageError};
use crate::hint::SizeHint;

pub trait Step {
    type Item;

    /// Move to the next element. Once this returns false it keeps returning
    /// false.
    fn advance(&mut self) -> bool;

    /// The element the last successful `advance()` moved to.
    ///
    /// Idempotent while valid. Panics when called before the first
    /// successful advance or after exhaustion.
    fn current(&self) -> Self::Item;

    /// What is known about the number of elements after the current one.
    /// Must not allocate or trigger any buffering.
    fn measure(&self) -> SizeHint;

    /// Hand off the remaining elements as an owned buffer, if this step holds
    /// them in one. Afterwards the step is exhausted.
    fn harvest(&mut self) -> Option<Vec<Self::Item>> {
        None
    }

    /// Adapt into a std iterator.
    fn items(self) -> StepIter<Self>
    where
        Self: Sized,
    {
        StepIter::new(self)
    }
}

impl<S: Step + ?Sized> Step for &mut S {
    type Item = S::Item;

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn current(&self) -> S::Item {
        (**self).current()
    }

    fn measure(&self) -> SizeHint {
        (**self).measure()
    }

    fn harvest(&mut self) -> Option<Vec<S::Item>> {
        (**self).harvest()
    }
}

impl<S: Step + ?Sized> Step for Box<S> {
    type Item = S::Item;

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn current(&self) -> S::Item {
        (**self).current()
    }

    fn measure(&self) -> SizeHint {
        (**self).measure()
    }

    fn harvest(&mut self) -> Option<Vec<S::Item>> {
        (**self).harvest()
    }
}

/// Where a step is in its life cycle, for misuse detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepState {
    #[default]
    Fresh,
    Active,
    Exhausted,
}

impl StepState {
    /// Record the outcome of an advance and pass it through.
    pub fn record(&mut self, advanced: bool) -> bool {
        *self = if advanced {
            StepState::Active
        } else {
            StepState::Exhausted
        };
        advanced
    }

    pub fn is_exhausted(self) -> bool {
        self == StepState::Exhausted
    }

    pub fn is_fresh(self) -> bool {
        self == StepState::Fresh
    }

    pub fn check(self) -> Result<(), UsageError> {
        match self {
            StepState::Active => Ok(()),
            StepState::Fresh => Err(UsageError::BeforeFirstAdvance),
            StepState::Exhausted => Err(UsageError::AfterExhaustion),
        }
    }

    /// Panic unless a current element is valid.
    #[track_caller]
    pub fn ensure_active(self) {
        if let Err(err) = self.check() {
            usage_violation(err);
        }
    }
}

/// Iterator view over a step.
#[derive(Debug)]
pub struct StepIter<S> {
    step: S,
}

impl<S> StepIter<S> {
    pub fn new(step: S) -> Self {
        Self { step }
    }

    pub fn into_inner(self) -> S {
        self.step
    }
}

impl<S: Step> Iterator for StepIter<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.step.advance() {
            Some(self.step.current())
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.step.measure().to_iter_hint()
    }
}

impl<S: Step> std::iter::FusedIterator for StepIter<S> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts down from `n`; enough to exercise the trait plumbing.
    struct Countdown {
        n: u32,
        state: StepState,
    }

    impl Step for Countdown {
        type Item = u32;

        fn advance(&mut self) -> bool {
            if self.state.is_exhausted() || self.n == 0 {
                return self.state.record(false);
            }
            if !self.state.is_fresh() {
                self.n -= 1;
            }
            self.state.record(self.n > 0)
        }

        fn current(&self) -> u32 {
            self.state.ensure_active();
            self.n
        }

        fn measure(&self) -> SizeHint {
            match self.state {
                StepState::Fresh => SizeHint::exact(self.n as usize),
                StepState::Active => SizeHint::exact(self.n as usize - 1),
                StepState::Exhausted => SizeHint::exact(0),
            }
        }
    }

    fn countdown(n: u32) -> Countdown {
        Countdown {
            n,
            state: StepState::Fresh,
        }
    }

    #[test]
    fn test_step_iter_collects() {
        let got: Vec<u32> = countdown(3).items().collect();
        assert_eq!(got, vec![3, 2, 1]);
    }

    #[test]
    fn test_blanket_impls_forward() {
        fn first<S: Step>(mut step: S) -> Option<S::Item> {
            step.advance().then(|| step.current())
        }

        let mut inner = countdown(2);
        assert_eq!(first(&mut inner), Some(2));
        // The borrowed step kept its position.
        assert_eq!(inner.current(), 2);

        let mut boxed: Box<dyn Step<Item = u32>> = Box::new(countdown(1));
        assert!(boxed.advance());
        assert_eq!(boxed.measure(), SizeHint::exact(0));
        assert!(!boxed.advance());
        assert!(boxed.harvest().is_none());
    }

    #[test]
    fn test_exhaustion_is_sticky() {
        let mut step = countdown(1);
        assert!(step.advance());
        assert!(!step.advance());
        assert!(!step.advance());
        assert_eq!(step.state.check(), Err(UsageError::AfterExhaustion));
    }

    #[test]
    #[should_panic(expected = "before first successful advance")]
    fn test_current_before_advance_panics() {
        countdown(2).current();
    }
}
