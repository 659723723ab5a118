//! Source factories: the first link of every chain.

use std::marker::PhantomData;
use std::ops::Add;
use std::sync::Arc;

use lazyseq_core::hint::SizeHint;
use lazyseq_steps::source::{
    Empty, IterSource, Once, RangeSource, RepeatSource, SharedSource, SliceSource, Successors,
};

use crate::factory::Factory;

/// Borrowed slice; yields references into it.
#[derive(Debug)]
pub struct FromSlice<'a, T> {
    items: &'a [T],
}

impl<'a, T> FromSlice<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items }
    }
}

impl<T> Clone for FromSlice<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FromSlice<'_, T> {}

impl<'a, T> Factory for FromSlice<'a, T> {
    type Step = SliceSource<'a, T>;

    fn build(&self) -> SliceSource<'a, T> {
        SliceSource::new(self.items)
    }

    fn measure(&self) -> SizeHint {
        SizeHint::exact(self.items.len())
    }
}

/// Shared, immutable elements; yields clones.
#[derive(Debug)]
pub struct FromShared<T> {
    items: Arc<[T]>,
}

impl<T> FromShared<T> {
    pub fn new(items: impl Into<Arc<[T]>>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T> Clone for FromShared<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: Clone> Factory for FromShared<T> {
    type Step = SharedSource<T>;

    fn build(&self) -> SharedSource<T> {
        SharedSource::new(Arc::clone(&self.items))
    }

    fn measure(&self) -> SizeHint {
        SizeHint::exact(self.items.len())
    }
}

/// Anything that can be iterated repeatedly by cloning: `&Vec<T>`,
/// `&HashMap<K, V>`, ranges, ...
#[derive(Debug, Clone, Copy)]
pub struct FromIter<I> {
    source: I,
}

impl<I> FromIter<I> {
    pub fn new(source: I) -> Self {
        Self { source }
    }
}

impl<I> Factory for FromIter<I>
where
    I: IntoIterator + Clone,
    I::Item: Clone,
{
    type Step = IterSource<I::IntoIter>;

    fn build(&self) -> Self::Step {
        IterSource::new(self.source.clone().into_iter())
    }
}

/// A repeated value, forever or `count` times.
#[derive(Debug, Clone)]
pub struct Repeat<T> {
    value: T,
    count: Option<usize>,
}

impl<T> Repeat<T> {
    pub fn forever(value: T) -> Self {
        Self { value, count: None }
    }

    pub fn times(value: T, count: usize) -> Self {
        Self {
            value,
            count: Some(count),
        }
    }
}

impl<T: Clone> Factory for Repeat<T> {
    type Step = RepeatSource<T>;

    fn build(&self) -> RepeatSource<T> {
        match self.count {
            Some(n) => RepeatSource::times(self.value.clone(), n),
            None => RepeatSource::forever(self.value.clone()),
        }
    }

    fn measure(&self) -> SizeHint {
        self.count.map_or(SizeHint::unbounded(), SizeHint::exact)
    }
}

/// Arithmetic progression of `count` values.
#[derive(Debug, Clone, Copy)]
pub struct RangeOf<T> {
    start: T,
    count: usize,
    step: T,
}

impl<T> RangeOf<T> {
    pub fn new(start: T, count: usize, step: T) -> Self {
        Self { start, count, step }
    }
}

impl<T> Factory for RangeOf<T>
where
    T: Copy + Add<Output = T>,
{
    type Step = RangeSource<T>;

    fn build(&self) -> RangeSource<T> {
        RangeSource::new(self.start, self.count, self.step)
    }

    fn measure(&self) -> SizeHint {
        SizeHint::exact(self.count)
    }
}

/// Open-ended generator: `seed`, `next(&seed)`, ...
#[derive(Debug, Clone)]
pub struct SuccessorsOf<T, F> {
    seed: T,
    next: F,
}

impl<T, F> SuccessorsOf<T, F>
where
    F: FnMut(&T) -> T + Clone,
{
    pub fn new(seed: T, next: F) -> Self {
        Self { seed, next }
    }
}

impl<T, F> Factory for SuccessorsOf<T, F>
where
    T: Clone,
    F: FnMut(&T) -> T + Clone,
{
    type Step = Successors<T, F>;

    fn build(&self) -> Successors<T, F> {
        Successors::new(self.seed.clone(), self.next.clone())
    }

    fn measure(&self) -> SizeHint {
        SizeHint::unbounded()
    }
}

#[derive(Debug)]
pub struct EmptyOf<T>(PhantomData<fn() -> T>);

impl<T> Default for EmptyOf<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T> Clone for EmptyOf<T> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<T> Factory for EmptyOf<T> {
    type Step = Empty<T>;

    fn build(&self) -> Empty<T> {
        Empty::new()
    }
}

#[derive(Debug, Clone)]
pub struct OnceOf<T>(T);

impl<T> OnceOf<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }
}

impl<T: Clone> Factory for OnceOf<T> {
    type Step = Once<T>;

    fn build(&self) -> Once<T> {
        Once::new(self.0.clone())
    }
}
