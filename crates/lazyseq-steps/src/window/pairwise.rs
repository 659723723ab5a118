//! Pairwise: combines each element with its predecessor.

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::{Step, StepState};
use lazyseq_mem::slot::Deferred;

pub struct Pairwise<S: Step, F> {
    upstream: S,
    prev: Deferred<S::Item>,
    combine: F,
    state: StepState,
}

impl<S: Step, F> Pairwise<S, F> {
    pub fn new<U>(upstream: S, combine: F) -> Self
    where
        F: Fn(&S::Item, &S::Item) -> U,
    {
        Self {
            upstream,
            prev: Deferred::new(),
            combine,
            state: StepState::Fresh,
        }
    }
}

impl<S, F, U> Step for Pairwise<S, F>
where
    S: Step,
    F: Fn(&S::Item, &S::Item) -> U,
{
    type Item = U;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() {
            return false;
        }
        if self.state.is_fresh() && !self.upstream.advance() {
            return self.state.record(false);
        }
        self.prev.set(self.upstream.current());
        let advanced = self.upstream.advance();
        self.state.record(advanced)
    }

    fn current(&self) -> U {
        self.state.ensure_active();
        (self.combine)(self.prev.get(), &self.upstream.current())
    }

    fn measure(&self) -> SizeHint {
        match self.state {
            StepState::Fresh => self.upstream.measure().subtract(1),
            StepState::Active => self.upstream.measure(),
            StepState::Exhausted => SizeHint::exact(0),
        }
    }
}
