//! Scan: a left fold that yields every partial result.
//!
//! Three seedings, each with its own constructor:
//!
//! - `Scan::seeded(up, seed, f)` yields `f(seed, x0)`, `f(f(seed, x0), x1)`, ...
//! - `Scan::mapped(up, first, f)` yields `first(x0)`, `f(first(x0), x1)`, ...
//! - `Scan::from_first(up, f)` yields `x0`, `f(x0, x1)`, ...

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::{Step, StepState};
use lazyseq_mem::slot::Deferred;

pub struct Scan<S, A, M, F> {
    upstream: S,
    first: Option<M>,
    acc: Deferred<A>,
    fold: F,
    state: StepState,
}

impl<S, A, F> Scan<S, A, fn(S::Item) -> A, F>
where
    S: Step,
    F: FnMut(A, S::Item) -> A,
{
    pub fn seeded(upstream: S, seed: A, fold: F) -> Self {
        Self {
            upstream,
            first: None,
            acc: Deferred::with(seed),
            fold,
            state: StepState::Fresh,
        }
    }
}

impl<S, A, M, F> Scan<S, A, M, F>
where
    S: Step,
    M: FnOnce(S::Item) -> A,
    F: FnMut(A, S::Item) -> A,
{
    pub fn mapped(upstream: S, first: M, fold: F) -> Self {
        Self {
            upstream,
            first: Some(first),
            acc: Deferred::new(),
            fold,
            state: StepState::Fresh,
        }
    }
}

impl<S, F> Scan<S, S::Item, fn(S::Item) -> S::Item, F>
where
    S: Step,
    F: FnMut(S::Item, S::Item) -> S::Item,
{
    pub fn from_first(upstream: S, fold: F) -> Self {
        Self::mapped(upstream, std::convert::identity, fold)
    }
}

impl<S, A, M, F> Step for Scan<S, A, M, F>
where
    S: Step,
    A: Clone,
    M: FnOnce(S::Item) -> A,
    F: FnMut(A, S::Item) -> A,
{
    type Item = A;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() || !self.upstream.advance() {
            return self.state.record(false);
        }
        let item = self.upstream.current();
        let next = match (self.acc.take(), self.first.take()) {
            (Some(acc), _) => (self.fold)(acc, item),
            (None, Some(first)) => first(item),
            (None, None) => return self.state.record(false),
        };
        self.acc.set(next);
        self.state.record(true)
    }

    fn current(&self) -> A {
        self.state.ensure_active();
        self.acc.get().clone()
    }

    fn measure(&self) -> SizeHint {
        if self.state.is_exhausted() {
            return SizeHint::exact(0);
        }
        self.upstream.measure()
    }
}
