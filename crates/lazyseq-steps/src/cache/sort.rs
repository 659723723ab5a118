//! Sort: a stable sort of the whole upstream under a caller-supplied order.

use std::cmp::Ordering;

use lazyseq_core::config::ReservePolicy;
use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::Step;

use super::{drain_upstream, Cached, Compute};

pub struct SortCompute<S, C> {
    upstream: S,
    cmp: C,
    reserve: ReservePolicy,
}

impl<S, C> Compute for SortCompute<S, C>
where
    S: Step,
    C: FnMut(&S::Item, &S::Item) -> Ordering,
{
    type Item = S::Item;

    fn compute(&mut self) -> Vec<S::Item> {
        let mut buf = drain_upstream(&mut self.upstream, self.reserve);
        buf.sort_by(&mut self.cmp);
        buf
    }

    fn pending_hint(&self) -> SizeHint {
        self.upstream.measure()
    }
}

pub type Sort<S, C> = Cached<SortCompute<S, C>>;

impl<S, C> Cached<SortCompute<S, C>>
where
    S: Step,
    C: FnMut(&S::Item, &S::Item) -> Ordering,
{
    pub fn new(upstream: S, cmp: C, reserve: ReservePolicy) -> Self {
        Cached::from_compute(SortCompute {
            upstream,
            cmp,
            reserve,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::source::{IterSource, SliceSource};
    use crate::testutil::{copied, drain};

    #[test]
    fn test_filter_then_sort() {
        let data = [2, 3, 4, 5, 6, 7, 8, 9, 2, 0];
        let odd = Filter::new(SliceSource::new(&data), |x| **x % 2 == 1);
        let sorted = Sort::new(odd, |a: &&i32, b: &&i32| b.cmp(a), ReservePolicy::default());
        assert_eq!(sorted.measure(), SizeHint::known_bound(10));
        assert_eq!(copied(sorted), vec![9, 7, 5, 3]);
    }

    #[test]
    fn test_sort_is_stable() {
        let data = [(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let sorted = Sort::new(
            SliceSource::new(&data),
            |a: &&(i32, char), b: &&(i32, char)| a.0.cmp(&b.0),
            ReservePolicy::default(),
        );
        let tags: Vec<char> = drain(sorted).into_iter().map(|p| p.1).collect();
        assert_eq!(tags, vec!['b', 'd', 'a', 'c']);
    }

    #[test]
    fn test_sort_of_sort_adopts_buffer() {
        let data = vec![3, 1, 2];
        let inner = Sort::new(
            IterSource::new(data.into_iter()),
            |a: &i32, b: &i32| a.cmp(b),
            ReservePolicy::default(),
        );
        let mut outer = Sort::new(inner, |a: &i32, b: &i32| b.cmp(a), ReservePolicy { max: 1 });
        assert_eq!(outer.measure(), SizeHint::exact(3));
        assert!(outer.advance());
        assert_eq!(outer.current(), 3);
        assert_eq!(outer.measure(), SizeHint::exact(2));
        assert_eq!(outer.harvest(), Some(vec![2, 1]));
    }

    #[test]
    fn test_sort_empty() {
        let data: [u8; 0] = [];
        let mut s = Sort::new(
            SliceSource::new(&data),
            |a: &&u8, b: &&u8| a.cmp(b),
            ReservePolicy::default(),
        );
        assert!(!s.advance());
        assert_eq!(s.measure(), SizeHint::exact(0));
    }
}
