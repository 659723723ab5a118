//! Minimums: every element tied for the smallest, in input order.
//!
//! One pass under a strict `is_less`; two elements tie when neither is less
//! than the other. Maximums are minimums under the swapped relation.

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::Step;

use super::{Cached, Compute};

pub struct MinimumsCompute<S, L> {
    upstream: S,
    is_less: L,
}

impl<S, L> MinimumsCompute<S, L>
where
    S: Step,
    L: FnMut(&S::Item, &S::Item) -> bool,
{
    fn offer(&mut self, group: &mut Vec<S::Item>, item: S::Item) {
        match group.first() {
            None => group.push(item),
            Some(best) if (self.is_less)(&item, best) => {
                group.clear();
                group.push(item);
            }
            Some(best) if !(self.is_less)(best, &item) => group.push(item),
            Some(_) => {}
        }
    }
}

impl<S, L> Compute for MinimumsCompute<S, L>
where
    S: Step,
    L: FnMut(&S::Item, &S::Item) -> bool,
{
    type Item = S::Item;

    fn compute(&mut self) -> Vec<S::Item> {
        let mut group = Vec::new();
        if let Some(items) = self.upstream.harvest() {
            for item in items {
                self.offer(&mut group, item);
            }
        } else {
            while self.upstream.advance() {
                let item = self.upstream.current();
                self.offer(&mut group, item);
            }
        }
        group
    }

    fn pending_hint(&self) -> SizeHint {
        self.upstream.measure().filtered(false)
    }
}

pub type Minimums<S, L> = Cached<MinimumsCompute<S, L>>;

impl<S, L> Cached<MinimumsCompute<S, L>>
where
    S: Step,
    L: FnMut(&S::Item, &S::Item) -> bool,
{
    pub fn new(upstream: S, is_less: L) -> Self {
        Cached::from_compute(MinimumsCompute { upstream, is_less })
    }
}
