//! Step templates: one marker type per step kind.
//!
//! A marker never exists as a value. It only names which step `Chained` or
//! `Joined` instantiates and what the arguments are.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use lazyseq_core::config::ReservePolicy;
use lazyseq_core::step::Step;
use lazyseq_mem::slot::Stored;
use lazyseq_steps::{
    CloseWithFirst, Concat, Counted, Filter, Flatten, Map, Membership, MembershipMode, Minimums,
    Pairwise, Scan, SelectOwned, SelectRef, Skip, Sort, Take, Until, UntilMode, Zip,
};

use crate::factory::{JoinTemplate, Template};

pub struct FilterOp<P>(PhantomData<fn() -> P>);

impl<S, P> Template<S> for FilterOp<P>
where
    S: Step,
    P: FnMut(&S::Item) -> bool + Clone,
{
    type Args = P;
    type Steady = ();
    type Output = Filter<S, P>;

    fn instantiate(upstream: S, pred: P, _: ()) -> Filter<S, P> {
        Filter::new(upstream, pred)
    }
}

pub struct MapOp<F>(PhantomData<fn() -> F>);

impl<S, F, U> Template<S> for MapOp<F>
where
    S: Step,
    F: Fn(S::Item) -> U + Clone,
{
    type Args = F;
    type Steady = ();
    type Output = Map<S, F>;

    fn instantiate(upstream: S, f: F, _: ()) -> Map<S, F> {
        Map::new(upstream, f)
    }
}

pub struct SelectRefOp<F>(PhantomData<fn() -> F>);

impl<'a, S, F, T, U> Template<S> for SelectRefOp<F>
where
    S: Step<Item = &'a T>,
    F: Fn(&'a T) -> &'a U + Clone,
    T: 'a + ?Sized,
    U: 'a + ?Sized,
{
    type Args = F;
    type Steady = ();
    type Output = SelectRef<S, F>;

    fn instantiate(upstream: S, f: F, _: ()) -> SelectRef<S, F> {
        SelectRef::new(upstream, f)
    }
}

pub struct SelectOwnedOp<F, U>(PhantomData<fn() -> (F, U)>);

impl<S, F, U> Template<S> for SelectOwnedOp<F, U>
where
    S: Step,
    F: Fn(&S::Item) -> &U + Clone,
    U: Clone,
{
    type Args = F;
    type Steady = ();
    type Output = SelectOwned<S, F, U>;

    fn instantiate(upstream: S, f: F, _: ()) -> SelectOwned<S, F, U> {
        SelectOwned::new(upstream, f)
    }
}

pub struct TakeOp;

impl<S: Step> Template<S> for TakeOp {
    type Args = ();
    type Steady = usize;
    type Output = Take<S>;

    fn instantiate(upstream: S, _: (), n: usize) -> Take<S> {
        Take::new(upstream, n)
    }
}

pub struct SkipOp;

impl<S: Step> Template<S> for SkipOp {
    type Args = ();
    type Steady = usize;
    type Output = Skip<S>;

    fn instantiate(upstream: S, _: (), n: usize) -> Skip<S> {
        Skip::new(upstream, n)
    }
}

pub struct UntilOp<P>(PhantomData<fn() -> P>);

impl<S, P> Template<S> for UntilOp<P>
where
    S: Step,
    P: FnMut(&S::Item) -> bool + Clone,
{
    type Args = P;
    type Steady = UntilMode;
    type Output = Until<S, P>;

    fn instantiate(upstream: S, pred: P, mode: UntilMode) -> Until<S, P> {
        Until::new(upstream, pred, mode)
    }
}

pub struct FlattenOp;

impl<S> Template<S> for FlattenOp
where
    S: Step,
    S::Item: IntoIterator,
    <S::Item as IntoIterator>::Item: Clone,
{
    type Args = ();
    type Steady = ();
    type Output = Flatten<S>;

    fn instantiate(upstream: S, _: (), _: ()) -> Flatten<S> {
        Flatten::new(upstream)
    }
}

pub struct CountedOp;

impl<S: Step> Template<S> for CountedOp {
    type Args = ();
    type Steady = usize;
    type Output = Counted<S>;

    fn instantiate(upstream: S, _: (), first: usize) -> Counted<S> {
        Counted::starting_at(upstream, first)
    }
}

pub struct PairwiseOp<F>(PhantomData<fn() -> F>);

impl<S, F, U> Template<S> for PairwiseOp<F>
where
    S: Step,
    F: Fn(&S::Item, &S::Item) -> U + Clone,
{
    type Args = F;
    type Steady = ();
    type Output = Pairwise<S, F>;

    fn instantiate(upstream: S, f: F, _: ()) -> Pairwise<S, F> {
        Pairwise::new(upstream, f)
    }
}

pub struct ScanSeededOp<A, F>(PhantomData<fn() -> (A, F)>);

impl<S, A, F> Template<S> for ScanSeededOp<A, F>
where
    S: Step,
    A: Clone,
    F: FnMut(A, S::Item) -> A + Clone,
{
    type Args = (A, F);
    type Steady = ();
    type Output = Scan<S, A, fn(S::Item) -> A, F>;

    fn instantiate(upstream: S, (seed, fold): (A, F), _: ()) -> Self::Output {
        Scan::seeded(upstream, seed, fold)
    }
}

pub struct ScanMappedOp<M, F>(PhantomData<fn() -> (M, F)>);

impl<S, A, M, F> Template<S> for ScanMappedOp<M, F>
where
    S: Step,
    A: Clone,
    M: FnOnce(S::Item) -> A + Clone,
    F: FnMut(A, S::Item) -> A + Clone,
{
    type Args = (M, F);
    type Steady = ();
    type Output = Scan<S, A, M, F>;

    fn instantiate(upstream: S, (first, fold): (M, F), _: ()) -> Self::Output {
        Scan::mapped(upstream, first, fold)
    }
}

pub struct ScanOp<F>(PhantomData<fn() -> F>);

impl<S, F> Template<S> for ScanOp<F>
where
    S: Step,
    S::Item: Clone,
    F: FnMut(S::Item, S::Item) -> S::Item + Clone,
{
    type Args = F;
    type Steady = ();
    type Output = Scan<S, S::Item, fn(S::Item) -> S::Item, F>;

    fn instantiate(upstream: S, fold: F, _: ()) -> Self::Output {
        Scan::from_first(upstream, fold)
    }
}

pub struct CloseWithFirstOp;

impl<S> Template<S> for CloseWithFirstOp
where
    S: Step,
    S::Item: Clone,
{
    type Args = ();
    type Steady = usize;
    type Output = CloseWithFirst<S>;

    fn instantiate(upstream: S, _: (), n: usize) -> CloseWithFirst<S> {
        CloseWithFirst::new(upstream, n)
    }
}

pub struct SortOp<C>(PhantomData<fn() -> C>);

impl<S, C> Template<S> for SortOp<C>
where
    S: Step,
    S::Item: Clone,
    C: FnMut(&S::Item, &S::Item) -> Ordering + Clone,
{
    type Args = C;
    type Steady = ReservePolicy;
    type Output = Sort<S, C>;

    fn instantiate(upstream: S, cmp: C, reserve: ReservePolicy) -> Sort<S, C> {
        Sort::new(upstream, cmp, reserve)
    }
}

pub struct MinimumsOp<L>(PhantomData<fn() -> L>);

impl<S, L> Template<S> for MinimumsOp<L>
where
    S: Step,
    S::Item: Clone,
    L: FnMut(&S::Item, &S::Item) -> bool + Clone,
{
    type Args = L;
    type Steady = ();
    type Output = Minimums<S, L>;

    fn instantiate(upstream: S, is_less: L, _: ()) -> Minimums<S, L> {
        Minimums::new(upstream, is_less)
    }
}

/// Membership against a set shared by every build. `'k` bounds the
/// lifetime of the keys.
pub struct SharedSetOp<'k, K>(PhantomData<(fn() -> K, &'k ())>);

impl<'k, S, K> Template<S> for SharedSetOp<'k, K>
where
    S: Step,
    S::Item: Borrow<K>,
    K: Hash + Eq + Clone + 'k,
{
    type Args = Arc<HashSet<K>>;
    type Steady = MembershipMode;
    type Output = Membership<'k, S, K>;

    fn instantiate(upstream: S, set: Arc<HashSet<K>>, mode: MembershipMode) -> Self::Output {
        Membership::with_set(upstream, Stored::shared(set), mode)
    }
}

pub struct ConcatOp;

impl<A, B> JoinTemplate<A, B> for ConcatOp
where
    A: Step,
    B: Step<Item = A::Item>,
{
    type Args = ();
    type Steady = ();
    type Output = Concat<A, B>;

    fn instantiate(first: A, second: B, _: (), _: ()) -> Concat<A, B> {
        Concat::new(first, second)
    }
}

pub struct ZipOp;

impl<A: Step, B: Step> JoinTemplate<A, B> for ZipOp {
    type Args = ();
    type Steady = ();
    type Output = Zip<A, B>;

    fn instantiate(left: A, right: B, _: (), _: ()) -> Zip<A, B> {
        Zip::new(left, right)
    }
}

/// Membership against a second pipeline, materialized per build.
pub struct MembershipOp<'k>(PhantomData<&'k ()>);

impl<'k, A, B, K> JoinTemplate<A, B> for MembershipOp<'k>
where
    A: Step,
    A::Item: Borrow<K>,
    B: Step<Item = K>,
    K: Hash + Eq + Clone + 'k,
{
    type Args = ();
    type Steady = (MembershipMode, ReservePolicy);
    type Output = Membership<'k, A, K>;

    fn instantiate(
        upstream: A,
        operand: B,
        _: (),
        (mode, reserve): (MembershipMode, ReservePolicy),
    ) -> Self::Output {
        Membership::from_step(upstream, operand, mode, reserve)
    }
}
