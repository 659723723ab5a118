//! `Query`: the builder surface.
//!
//! Every chain method consumes the query and wraps its factory in one more
//! `Chained`/`Joined` layer, so the full pipeline is one concrete type known
//! at compile time. Nothing runs until `steps()`/`iter()` (or a terminal in
//! `lazyseq-exec`) builds a step graph.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;
use std::ops::Add;
use std::sync::Arc;

use lazyseq_core::config::{ReservePolicy, SeqConfig};
use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::{Step, StepIter};
use lazyseq_steps::{MembershipMode, UntilMode};

use crate::erased::ErasedFactory;
use crate::factory::{Chained, Factory, ItemOf, Joined, Template};
use crate::sources::{
    EmptyOf, FromIter, FromShared, FromSlice, OnceOf, RangeOf, Repeat, SuccessorsOf,
};
use crate::templates::{
    CloseWithFirstOp, ConcatOp, CountedOp, FilterOp, FlattenOp, MapOp, MembershipOp, MinimumsOp,
    PairwiseOp, ScanMappedOp, ScanOp, ScanSeededOp, SelectOwnedOp, SelectRefOp, SharedSetOp,
    SkipOp, SortOp, TakeOp, UntilOp, ZipOp,
};

/// Plain comparator used by [`Query::sort`].
type CmpFn<T> = fn(&T, &T) -> Ordering;
/// Plain strict-less predicate used by [`Query::minimums`]/[`Query::maximums`].
type LessFn<T> = fn(&T, &T) -> bool;

fn natural_less<T: Ord>(a: &T, b: &T) -> bool {
    a < b
}

fn natural_greater<T: Ord>(a: &T, b: &T) -> bool {
    a > b
}

#[derive(Clone, Copy, Debug)]
pub struct Query<F> {
    factory: F,
}

impl<F> Query<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn into_factory(self) -> F {
        self.factory
    }
}

impl<'a, T> Query<FromSlice<'a, T>> {
    pub fn from_slice(items: &'a [T]) -> Self {
        Self::new(FromSlice::new(items))
    }
}

impl<T: Clone> Query<FromShared<T>> {
    pub fn from_shared(items: impl Into<Arc<[T]>>) -> Self {
        Self::new(FromShared::new(items))
    }
}

impl<I> Query<FromIter<I>>
where
    I: IntoIterator + Clone,
    I::Item: Clone,
{
    /// Anything re-iterable by cloning, e.g. `&HashMap` or a range.
    pub fn from_iterable(source: I) -> Self {
        Self::new(FromIter::new(source))
    }
}

impl<T: Clone> Query<Repeat<T>> {
    pub fn repeat(value: T) -> Self {
        Self::new(Repeat::forever(value))
    }

    pub fn repeat_n(value: T, count: usize) -> Self {
        Self::new(Repeat::times(value, count))
    }
}

impl<T> Query<RangeOf<T>>
where
    T: Copy + Add<Output = T>,
{
    /// `count` values: `start`, `start + step`, ...
    pub fn range(start: T, count: usize, step: T) -> Self {
        Self::new(RangeOf::new(start, count, step))
    }
}

impl<T, G> Query<SuccessorsOf<T, G>>
where
    T: Clone,
    G: FnMut(&T) -> T + Clone,
{
    pub fn successors(seed: T, next: G) -> Self {
        Self::new(SuccessorsOf::new(seed, next))
    }
}

impl<T> Query<EmptyOf<T>> {
    pub fn empty() -> Self {
        Self::new(EmptyOf::default())
    }
}

impl<T: Clone> Query<OnceOf<T>> {
    pub fn once(value: T) -> Self {
        Self::new(OnceOf::new(value))
    }
}

impl<F: Factory> Factory for Query<F> {
    type Step = F::Step;

    fn build(&self) -> F::Step {
        self.factory.build()
    }

    fn measure(&self) -> SizeHint {
        self.factory.measure()
    }
}

impl<'q, F: Factory> IntoIterator for &'q Query<F> {
    type Item = ItemOf<F>;
    type IntoIter = StepIter<F::Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<F: Factory> Query<F> {
    /// A fresh step graph.
    pub fn steps(&self) -> F::Step {
        self.factory.build()
    }

    /// A fresh step graph driven as an `Iterator`.
    pub fn iter(&self) -> StepIter<F::Step> {
        StepIter::new(self.factory.build())
    }

    fn chain<K>(self, args: K::Args, steady: K::Steady) -> Query<Chained<F, K>>
    where
        K: Template<F::Step>,
    {
        Query::new(Chained::new(self.factory, args, steady))
    }

    // ---- streaming ----

    pub fn filter<P>(self, pred: P) -> Query<Chained<F, FilterOp<P>>>
    where
        P: FnMut(&ItemOf<F>) -> bool + Clone,
    {
        self.chain(pred, ())
    }

    pub fn map<G, U>(self, f: G) -> Query<Chained<F, MapOp<G>>>
    where
        G: Fn(ItemOf<F>) -> U + Clone,
    {
        self.chain(f, ())
    }

    /// Project a borrowed element to a borrowed part of it.
    pub fn select_ref<'a, T, U, G>(self, f: G) -> Query<Chained<F, SelectRefOp<G>>>
    where
        F::Step: Step<Item = &'a T>,
        G: Fn(&'a T) -> &'a U + Clone,
        T: 'a + ?Sized,
        U: 'a + ?Sized,
    {
        self.chain(f, ())
    }

    /// Project to a part of the element and yield a clone of that part.
    pub fn select_owned<U, G>(self, f: G) -> Query<Chained<F, SelectOwnedOp<G, U>>>
    where
        G: Fn(&ItemOf<F>) -> &U + Clone,
        U: Clone,
    {
        self.chain(f, ())
    }

    pub fn take(self, n: usize) -> Query<Chained<F, TakeOp>> {
        self.chain((), n)
    }

    pub fn skip(self, n: usize) -> Query<Chained<F, SkipOp>> {
        self.chain((), n)
    }

    /// Elements while `pred` holds; stops at the first failure.
    pub fn take_while<P>(self, pred: P) -> Query<Chained<F, UntilOp<P>>>
    where
        P: FnMut(&ItemOf<F>) -> bool + Clone,
    {
        self.chain(pred, UntilMode::TakeWhile)
    }

    /// Drops elements up to (not including) the first one matching `pred`.
    pub fn skip_until<P>(self, pred: P) -> Query<Chained<F, UntilOp<P>>>
    where
        P: FnMut(&ItemOf<F>) -> bool + Clone,
    {
        self.chain(pred, UntilMode::SkipUntil)
    }

    /// Elements up to and including the first one matching `pred`.
    pub fn take_until_final<P>(self, pred: P) -> Query<Chained<F, UntilOp<P>>>
    where
        P: FnMut(&ItemOf<F>) -> bool + Clone,
    {
        self.chain(pred, UntilMode::TakeUntilFinal)
    }

    pub fn concat<G>(self, other: Query<G>) -> Query<Joined<F, G, ConcatOp>>
    where
        G: Factory,
        G::Step: Step<Item = ItemOf<F>>,
    {
        Query::new(Joined::new((self.factory, other.factory), (), ()))
    }

    pub fn zip<G: Factory>(self, other: Query<G>) -> Query<Joined<F, G, ZipOp>> {
        Query::new(Joined::new((self.factory, other.factory), (), ()))
    }

    pub fn flatten(self) -> Query<Chained<F, FlattenOp>>
    where
        ItemOf<F>: IntoIterator,
        <ItemOf<F> as IntoIterator>::Item: Clone,
    {
        self.chain((), ())
    }

    /// Pairs every element with its zero-based position.
    pub fn counted(self) -> Query<Chained<F, CountedOp>> {
        self.chain((), 0)
    }

    pub fn pairwise<G, U>(self, combine: G) -> Query<Chained<F, PairwiseOp<G>>>
    where
        G: Fn(&ItemOf<F>, &ItemOf<F>) -> U + Clone,
    {
        self.chain(combine, ())
    }

    /// Running fold starting from `seed`; yields every intermediate value.
    pub fn scan_seeded<A, G>(self, seed: A, fold: G) -> Query<Chained<F, ScanSeededOp<A, G>>>
    where
        A: Clone,
        G: FnMut(A, ItemOf<F>) -> A + Clone,
    {
        self.chain((seed, fold), ())
    }

    /// Running fold whose first value is `first(element)`.
    pub fn scan_mapped<A, M, G>(self, first: M, fold: G) -> Query<Chained<F, ScanMappedOp<M, G>>>
    where
        A: Clone,
        M: FnOnce(ItemOf<F>) -> A + Clone,
        G: FnMut(A, ItemOf<F>) -> A + Clone,
    {
        self.chain((first, fold), ())
    }

    /// Running fold seeded with the first element itself.
    pub fn scan<G>(self, fold: G) -> Query<Chained<F, ScanOp<G>>>
    where
        ItemOf<F>: Clone,
        G: FnMut(ItemOf<F>, ItemOf<F>) -> ItemOf<F> + Clone,
    {
        self.chain(fold, ())
    }

    pub fn close_with_first(self, n: usize) -> Query<Chained<F, CloseWithFirstOp>>
    where
        ItemOf<F>: Clone,
    {
        self.chain((), n)
    }

    // ---- membership ----

    /// Elements whose key is absent from `other`, in order.
    pub fn except<'k, G>(self, other: Query<G>) -> Query<Joined<F, G, MembershipOp<'k>>>
    where
        G: Factory,
        ItemOf<F>: Borrow<ItemOf<G>>,
        ItemOf<G>: Hash + Eq + Clone + 'k,
    {
        self.join_membership(other, MembershipMode::Except)
    }

    /// Distinct elements whose key is present in `other`, in first-seen order.
    pub fn intersect<'k, G>(self, other: Query<G>) -> Query<Joined<F, G, MembershipOp<'k>>>
    where
        G: Factory,
        ItemOf<F>: Borrow<ItemOf<G>>,
        ItemOf<G>: Hash + Eq + Clone + 'k,
    {
        self.join_membership(other, MembershipMode::Intersect)
    }

    fn join_membership<'k, G>(
        self,
        other: Query<G>,
        mode: MembershipMode,
    ) -> Query<Joined<F, G, MembershipOp<'k>>>
    where
        G: Factory,
        ItemOf<F>: Borrow<ItemOf<G>>,
        ItemOf<G>: Hash + Eq + Clone + 'k,
    {
        Query::new(Joined::new(
            (self.factory, other.factory),
            (),
            (mode, ReservePolicy::default()),
        ))
    }

    /// Like [`Self::except`] against a prebuilt set shared by every build.
    pub fn except_set<'k, K>(
        self,
        set: impl Into<Arc<HashSet<K>>>,
    ) -> Query<Chained<F, SharedSetOp<'k, K>>>
    where
        ItemOf<F>: Borrow<K>,
        K: Hash + Eq + Clone + 'k,
    {
        self.chain(set.into(), MembershipMode::Except)
    }

    pub fn intersect_set<'k, K>(
        self,
        set: impl Into<Arc<HashSet<K>>>,
    ) -> Query<Chained<F, SharedSetOp<'k, K>>>
    where
        ItemOf<F>: Borrow<K>,
        K: Hash + Eq + Clone + 'k,
    {
        self.chain(set.into(), MembershipMode::Intersect)
    }

    // ---- caching ----

    pub fn sort(self) -> Query<Chained<F, SortOp<CmpFn<ItemOf<F>>>>>
    where
        ItemOf<F>: Ord + Clone,
    {
        self.chain(<ItemOf<F> as Ord>::cmp as CmpFn<ItemOf<F>>, ReservePolicy::default())
    }

    /// Stable sort by `cmp`.
    pub fn sort_by<C>(self, cmp: C) -> Query<Chained<F, SortOp<C>>>
    where
        ItemOf<F>: Clone,
        C: FnMut(&ItemOf<F>, &ItemOf<F>) -> Ordering + Clone,
    {
        self.chain(cmp, ReservePolicy::default())
    }

    pub fn sort_by_key<K, G>(
        self,
        key: G,
    ) -> Query<Chained<F, SortOp<impl FnMut(&ItemOf<F>, &ItemOf<F>) -> Ordering + Clone>>>
    where
        ItemOf<F>: Clone,
        G: Fn(&ItemOf<F>) -> K + Clone,
        K: Ord,
    {
        self.sort_by(move |a: &ItemOf<F>, b: &ItemOf<F>| key(a).cmp(&key(b)))
    }

    /// Every element equal to the smallest one, in input order.
    pub fn minimums(self) -> Query<Chained<F, MinimumsOp<LessFn<ItemOf<F>>>>>
    where
        ItemOf<F>: Ord + Clone,
    {
        self.chain(natural_less::<ItemOf<F>> as LessFn<ItemOf<F>>, ())
    }

    /// Minimums under the strict ordering `is_less`.
    pub fn minimums_by<L>(self, is_less: L) -> Query<Chained<F, MinimumsOp<L>>>
    where
        ItemOf<F>: Clone,
        L: FnMut(&ItemOf<F>, &ItemOf<F>) -> bool + Clone,
    {
        self.chain(is_less, ())
    }

    pub fn minimums_by_key<K, G>(
        self,
        key: G,
    ) -> Query<Chained<F, MinimumsOp<impl FnMut(&ItemOf<F>, &ItemOf<F>) -> bool + Clone>>>
    where
        ItemOf<F>: Clone,
        G: Fn(&ItemOf<F>) -> K + Clone,
        K: Ord,
    {
        self.minimums_by(move |a: &ItemOf<F>, b: &ItemOf<F>| key(a) < key(b))
    }

    /// Every element equal to the largest one, in input order.
    pub fn maximums(self) -> Query<Chained<F, MinimumsOp<LessFn<ItemOf<F>>>>>
    where
        ItemOf<F>: Ord + Clone,
    {
        self.chain(natural_greater::<ItemOf<F>> as LessFn<ItemOf<F>>, ())
    }

    /// Maximums under the strict ordering `is_less`.
    pub fn maximums_by<L>(
        self,
        mut is_less: L,
    ) -> Query<Chained<F, MinimumsOp<impl FnMut(&ItemOf<F>, &ItemOf<F>) -> bool + Clone>>>
    where
        ItemOf<F>: Clone,
        L: FnMut(&ItemOf<F>, &ItemOf<F>) -> bool + Clone,
    {
        self.minimums_by(move |a: &ItemOf<F>, b: &ItemOf<F>| is_less(b, a))
    }

    // ---- erasure ----

    /// Hide the pipeline type; inline placement per `SeqConfig::default()`.
    pub fn erase<'a>(self) -> Query<ErasedFactory<'a, ItemOf<F>>>
    where
        F: 'a,
        F::Step: 'a,
    {
        Query::new(ErasedFactory::new(self.factory))
    }

    pub fn erase_with<'a>(self, cfg: &SeqConfig) -> Query<ErasedFactory<'a, ItemOf<F>>>
    where
        F: 'a,
        F::Step: 'a,
    {
        Query::new(ErasedFactory::with_config(self.factory, cfg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: String,
        age: u32,
    }

    fn people() -> Vec<Person> {
        [("ada", 36), ("bo", 19), ("cy", 36), ("di", 52)]
            .into_iter()
            .map(|(n, a)| Person {
                name: n.to_string(),
                age: a,
            })
            .collect()
    }

    #[test]
    fn test_query_is_reusable() {
        let data = [2, 3, 4, 5, 6, 7, 8, 9, 2, 0];
        let odd_sorted = Query::from_slice(&data).filter(|x| **x % 2 == 1).sort();
        let first: Vec<i32> = odd_sorted.iter().copied().collect();
        let second: Vec<i32> = odd_sorted.iter().copied().collect();
        assert_eq!(first, vec![3, 5, 7, 9]);
        assert_eq!(first, second);
        assert_eq!(odd_sorted.measure(), SizeHint::known_bound(10));
    }

    #[test]
    fn test_projections() {
        let ps = people();
        let names: Vec<&str> = Query::from_slice(&ps)
            .select_ref(|p| p.name.as_str())
            .iter()
            .collect();
        assert_eq!(names, vec!["ada", "bo", "cy", "di"]);

        let shared = Query::from_shared(ps.clone()).select_owned(|p| &p.name);
        assert_eq!(shared.iter().last(), Some("di".to_string()));

        let ages: Vec<u32> = Query::from_slice(&ps).map(|p| p.age).iter().collect();
        assert_eq!(ages, vec![36, 19, 36, 52]);
    }

    #[test]
    fn test_until_family() {
        let q = Query::range(1, 6, 1);
        assert_eq!(q.take_while(|x| *x < 3).iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(q.skip_until(|x| *x == 5).iter().collect::<Vec<_>>(), vec![5, 6]);
        assert_eq!(
            q.take_until_final(|x| *x == 3).iter().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_joins_and_windows() {
        let data = [1, 2, 3, 4, 5];
        let q = Query::from_slice(&data);
        let back: Vec<i32> = q.take(3).concat(q.skip(3)).iter().copied().collect();
        assert_eq!(back, data);

        let zipped: Vec<(i32, char)> = Query::range(0, 3, 1)
            .zip(Query::from_iterable("abcd".chars()))
            .iter()
            .collect();
        assert_eq!(zipped, vec![(0, 'a'), (1, 'b'), (2, 'c')]);

        let gaps: Vec<i32> = q.pairwise(|a, b| **b - **a).iter().collect();
        assert_eq!(gaps, vec![1, 1, 1, 1]);

        let closed: Vec<i32> = q.close_with_first(1).iter().copied().collect();
        assert_eq!(closed, vec![1, 2, 3, 4, 5, 1]);

        let indexed: Vec<(usize, &i32)> = q.skip(3).counted().iter().collect();
        assert_eq!(indexed, vec![(0, &4), (1, &5)]);
    }

    #[test]
    fn test_scans() {
        let q = Query::range(1, 4, 1);
        let sums: Vec<i32> = q.scan(|a, b| a + b).iter().collect();
        assert_eq!(sums, vec![1, 3, 6, 10]);

        let seeded: Vec<i64> = q.scan_seeded(100i64, |a, b| a - i64::from(b)).iter().collect();
        assert_eq!(seeded, vec![99, 97, 94, 90]);

        let labels: Vec<String> = q
            .scan_mapped(|x| x.to_string(), |acc, x| format!("{acc}{x}"))
            .iter()
            .collect();
        assert_eq!(labels, vec!["1", "12", "123", "1234"]);
    }

    #[test]
    fn test_membership() {
        let data = [5, 1, 4, 1, 3, 4];
        let excluded = [1, 4];
        let q = Query::from_slice(&data);
        let kept: Vec<i32> = q.except(Query::from_slice(&excluded)).iter().copied().collect();
        assert_eq!(kept, vec![5, 3]);
        let both: Vec<i32> = q.intersect(Query::from_slice(&excluded)).iter().copied().collect();
        assert_eq!(both, vec![1, 4]);

        let words = ["a", "b", "c", "b"];
        let set: HashSet<&str> = ["b"].into_iter().collect();
        let shared = Arc::new(set);
        let w = Query::from_iterable(words);
        assert_eq!(
            w.except_set(Arc::clone(&shared)).iter().collect::<Vec<_>>(),
            vec!["a", "c"]
        );
        assert_eq!(w.intersect_set(shared).iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_caching_variants() {
        let ps = people();
        let q = Query::from_slice(&ps);
        let by_age: Vec<&str> = q
            .sort_by_key(|p| p.age)
            .select_ref(|p| p.name.as_str())
            .iter()
            .collect();
        assert_eq!(by_age, vec!["bo", "ada", "cy", "di"]);

        let ages_desc: Vec<u32> = q
            .sort_by(|a, b| b.age.cmp(&a.age))
            .map(|p| p.age)
            .iter()
            .collect();
        assert_eq!(ages_desc, vec![52, 36, 36, 19]);

        let oldest: Vec<&str> = q
            .maximums_by(|a, b| a.age < b.age)
            .map(|p| p.name.as_str())
            .iter()
            .collect();
        assert_eq!(oldest, vec!["di"]);

        let tied: Vec<&str> = q
            .minimums_by_key(|p| u32::MAX - p.age)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(tied, vec!["di"]);
        let middle: Vec<&str> = q
            .skip(3)
            .concat(q.take(3))
            .minimums_by_key(|p| p.age.abs_diff(36))
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(middle, vec!["ada", "cy"]);

        let data = [5, 2, 8, 2, 2, 9];
        let d = Query::from_slice(&data);
        assert_eq!(d.minimums().iter().copied().collect::<Vec<_>>(), vec![2, 2, 2]);
        assert_eq!(d.maximums().iter().copied().collect::<Vec<_>>(), vec![9]);
        assert_eq!(d.minimums_by(|a, b| a > b).iter().count(), 1);
    }

    #[test]
    fn test_flatten_skips_empty_groups() {
        let groups: Vec<Vec<i32>> = vec![vec![], vec![1, 2], vec![4], vec![], vec![5, 6, 7]];
        let flat = Query::from_slice(&groups).flatten();
        assert_eq!(flat.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4, 5, 6, 7]);
        assert!(flat.measure().is_unknown());
    }

    #[test]
    fn test_erase_matches_direct() {
        let data = [4, 1, 3];
        let direct: Vec<i32> = Query::from_slice(&data).sort().iter().copied().collect();
        let erased = Query::from_slice(&data).sort().erase();
        assert_eq!(erased.iter().copied().collect::<Vec<_>>(), direct);

        let cfg = SeqConfig {
            inline_erasure: false,
            ..SeqConfig::default()
        };
        let boxed = Query::from_slice(&data).sort().erase_with(&cfg);
        assert!(!boxed.steps().is_inline());
        assert_eq!((&boxed).into_iter().count(), 3);
    }

    #[test]
    fn test_generated_sources() {
        assert_eq!(Query::repeat_n('x', 2).iter().collect::<String>(), "xx");
        assert_eq!(Query::repeat(1).take(3).iter().sum::<i32>(), 3);
        assert!(Query::repeat(1).measure().is_unbounded());
        let pow: Vec<u32> = Query::successors(1u32, |x| x * 2).take(5).iter().collect();
        assert_eq!(pow, vec![1, 2, 4, 8, 16]);
        assert_eq!(Query::<EmptyOf<u8>>::empty().iter().count(), 0);
        assert_eq!(Query::once("one").iter().collect::<Vec<_>>(), vec!["one"]);
    }
}
