//! Flatten: one level of nesting removed.
//!
//! Each upstream element is any `IntoIterator` (a container, a borrowed
//! container, or a step adapted with `Step::items`). A nested source is
//! opened per outer element and empty ones are skipped.

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::{Step, StepState};
use lazyseq_mem::slot::Deferred;

use crate::source::IterSource;

pub struct Flatten<S>
where
    S: Step,
    S::Item: IntoIterator,
{
    outer: S,
    inner: Deferred<IterSource<<S::Item as IntoIterator>::IntoIter>>,
    state: StepState,
}

impl<S> Flatten<S>
where
    S: Step,
    S::Item: IntoIterator,
{
    pub fn new(outer: S) -> Self {
        Self {
            outer,
            inner: Deferred::new(),
            state: StepState::Fresh,
        }
    }
}

impl<S> Step for Flatten<S>
where
    S: Step,
    S::Item: IntoIterator,
    <S::Item as IntoIterator>::Item: Clone,
{
    type Item = <S::Item as IntoIterator>::Item;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() {
            return false;
        }
        loop {
            if let Some(inner) = self.inner.try_get_mut() {
                if inner.advance() {
                    return self.state.record(true);
                }
            }
            if !self.outer.advance() {
                self.inner.clear();
                return self.state.record(false);
            }
            self.inner.set(IterSource::new(self.outer.current().into_iter()));
        }
    }

    fn current(&self) -> Self::Item {
        self.state.ensure_active();
        self.inner.get().current()
    }

    fn measure(&self) -> SizeHint {
        // Inner lengths are not known ahead of time.
        if self.state.is_exhausted() {
            SizeHint::exact(0)
        } else {
            SizeHint::unknown()
        }
    }
}
