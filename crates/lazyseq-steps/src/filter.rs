//! Filter step: passes through the elements a predicate accepts.

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::Step;

pub struct Filter<S, P> {
    upstream: S,
    pred: P,
}

impl<S, P> Filter<S, P>
where
    S: Step,
    P: FnMut(&S::Item) -> bool,
{
    pub fn new(upstream: S, pred: P) -> Self {
        Self { upstream, pred }
    }
}

impl<S, P> Step for Filter<S, P>
where
    S: Step,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn advance(&mut self) -> bool {
        while self.upstream.advance() {
            if (self.pred)(&self.upstream.current()) {
                return true;
            }
        }
        false
    }

    fn current(&self) -> S::Item {
        // The upstream sits on the accepted element, or is exhausted and
        // reports the misuse itself.
        self.upstream.current()
    }

    fn measure(&self) -> SizeHint {
        self.upstream.measure().filtered(false)
    }
}
