//! Count-based limits: `Take(n)` and `Skip(n)`.

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::{Step, StepState};

/// At most the first `n` elements.
pub struct Take<S> {
    upstream: S,
    remaining: usize,
    state: StepState,
}

impl<S> Take<S> {
    pub fn new(upstream: S, n: usize) -> Self {
        Self {
            upstream,
            remaining: n,
            state: StepState::Fresh,
        }
    }
}

impl<S: Step> Step for Take<S> {
    type Item = S::Item;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() || self.remaining == 0 {
            return self.state.record(false);
        }
        self.remaining -= 1;
        let advanced = self.upstream.advance();
        self.state.record(advanced)
    }

    fn current(&self) -> S::Item {
        self.state.ensure_active();
        self.upstream.current()
    }

    fn measure(&self) -> SizeHint {
        if self.state.is_exhausted() {
            return SizeHint::exact(0);
        }
        self.upstream.measure().limit_to(self.remaining)
    }
}

/// Everything after the first `n` elements.
pub struct Skip<S> {
    upstream: S,
    to_skip: usize,
}

impl<S> Skip<S> {
    pub fn new(upstream: S, n: usize) -> Self {
        Self {
            upstream,
            to_skip: n,
        }
    }
}

impl<S: Step> Step for Skip<S> {
    type Item = S::Item;

    fn advance(&mut self) -> bool {
        while self.to_skip > 0 {
            self.to_skip -= 1;
            if !self.upstream.advance() {
                self.to_skip = 0;
                return false;
            }
        }
        self.upstream.advance()
    }

    fn current(&self) -> S::Item {
        self.upstream.current()
    }

    fn measure(&self) -> SizeHint {
        self.upstream.measure().subtract(self.to_skip)
    }
}
