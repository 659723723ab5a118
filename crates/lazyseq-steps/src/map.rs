//! Element-wise projection steps.
//!
//! `Map` produces new values. The two `Select` steps project to a part of
//! each element: `SelectRef` keeps references into upstream storage alive
//! for their full lifetime, `SelectOwned` clones the selected part out of an
//! owned element (a reference into it would dangle once the element is
//! gone, so that variant cannot return one).

use std::marker::PhantomData;

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::Step;

pub struct Map<S, F> {
    upstream: S,
    f: F,
}

impl<S, F> Map<S, F> {
    pub fn new<U>(upstream: S, f: F) -> Self
    where
        S: Step,
        F: Fn(S::Item) -> U,
    {
        Self { upstream, f }
    }
}

impl<S, F, U> Step for Map<S, F>
where
    S: Step,
    F: Fn(S::Item) -> U,
{
    type Item = U;

    fn advance(&mut self) -> bool {
        self.upstream.advance()
    }

    fn current(&self) -> U {
        (self.f)(self.upstream.current())
    }

    fn measure(&self) -> SizeHint {
        self.upstream.measure()
    }
}

/// Projects `&'a T` to `&'a U`.
pub struct SelectRef<S, F> {
    upstream: S,
    f: F,
}

impl<S, F> SelectRef<S, F> {
    pub fn new<'a, T, U>(upstream: S, f: F) -> Self
    where
        S: Step<Item = &'a T>,
        F: Fn(&'a T) -> &'a U,
        T: 'a + ?Sized,
        U: 'a + ?Sized,
    {
        Self { upstream, f }
    }
}

impl<'a, S, F, T, U> Step for SelectRef<S, F>
where
    S: Step<Item = &'a T>,
    F: Fn(&'a T) -> &'a U,
    T: 'a + ?Sized,
    U: 'a + ?Sized,
{
    type Item = &'a U;

    fn advance(&mut self) -> bool {
        self.upstream.advance()
    }

    fn current(&self) -> &'a U {
        (self.f)(self.upstream.current())
    }

    fn measure(&self) -> SizeHint {
        self.upstream.measure()
    }
}

/// Projects an owned element to a clone of one of its parts.
pub struct SelectOwned<S, F, U> {
    upstream: S,
    f: F,
    _part: PhantomData<fn() -> U>,
}

impl<S, F, U> SelectOwned<S, F, U>
where
    S: Step,
    F: Fn(&S::Item) -> &U,
{
    pub fn new(upstream: S, f: F) -> Self {
        Self {
            upstream,
            f,
            _part: PhantomData,
        }
    }
}

impl<S, F, U> Step for SelectOwned<S, F, U>
where
    S: Step,
    F: Fn(&S::Item) -> &U,
    U: Clone,
{
    type Item = U;

    fn advance(&mut self) -> bool {
        self.upstream.advance()
    }

    fn current(&self) -> U {
        let item = self.upstream.current();
        (self.f)(&item).clone()
    }

    fn measure(&self) -> SizeHint {
        self.upstream.measure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SharedSource, SliceSource};
    use crate::testutil::drain;

    struct Pair {
        name: String,
        score: u32,
    }

    fn pairs() -> Vec<Pair> {
        vec![
            Pair {
                name: "a".into(),
                score: 3,
            },
            Pair {
                name: "b".into(),
                score: 5,
            },
        ]
    }

    #[test]
    fn test_map_produces_values() {
        let data = pairs();
        let m = Map::new(SliceSource::new(&data), |p: &Pair| p.score * 10);
        assert_eq!(m.measure(), SizeHint::exact(2));
        assert_eq!(drain(m), vec![30, 50]);
    }

    #[test]
    fn test_select_ref_points_into_source() {
        let data = pairs();
        let got = drain(SelectRef::new(SliceSource::new(&data), |p| &p.name));
        assert!(std::ptr::eq(got[1], &data[1].name));
        let strs = drain(SelectRef::new(SliceSource::new(&data), |p| p.name.as_str()));
        assert_eq!(strs, vec!["a", "b"]);
    }

    #[test]
    fn test_select_owned_clones_part() {
        let shared: std::sync::Arc<[(u8, String)]> =
            vec![(1, "x".to_string()), (2, "y".to_string())].into();
        let got = drain(SelectOwned::new(
            SharedSource::new(shared),
            |t| &t.1,
        ));
        assert_eq!(got, vec!["x".to_string(), "y".to_string()]);
    }
}
