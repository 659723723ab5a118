//! Source steps: where elements come from.
//!
//! `SliceSource` yields references into borrowed storage; the remaining
//! sources yield owned values (cloned from shared or iterator state, or
//! generated).

use std::iter::Fuse;
use std::marker::PhantomData;
use std::ops::Add;
use std::sync::Arc;

use lazyseq_core::error::{usage_violation, UsageError};
use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::{Step, StepState};
use lazyseq_mem::slot::{Deferred, Reassignable};

/// References into a borrowed slice, in order.
#[derive(Debug)]
pub struct SliceSource<'a, T> {
    items: &'a [T],
    next: usize,
    state: StepState,
}

impl<'a, T> SliceSource<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            next: 0,
            state: StepState::Fresh,
        }
    }
}

impl<'a, T> Step for SliceSource<'a, T> {
    type Item = &'a T;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() || self.next == self.items.len() {
            return self.state.record(false);
        }
        self.next += 1;
        self.state.record(true)
    }

    fn current(&self) -> &'a T {
        self.state.ensure_active();
        &self.items[self.next - 1]
    }

    fn measure(&self) -> SizeHint {
        SizeHint::exact(self.items.len() - self.next)
    }
}

/// Clones out of a shared, immutable slice.
#[derive(Debug)]
pub struct SharedSource<T> {
    items: Arc<[T]>,
    next: usize,
    state: StepState,
}

impl<T> SharedSource<T> {
    pub fn new(items: Arc<[T]>) -> Self {
        Self {
            items,
            next: 0,
            state: StepState::Fresh,
        }
    }
}

impl<T: Clone> Step for SharedSource<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() || self.next == self.items.len() {
            return self.state.record(false);
        }
        self.next += 1;
        self.state.record(true)
    }

    fn current(&self) -> T {
        self.state.ensure_active();
        self.items[self.next - 1].clone()
    }

    fn measure(&self) -> SizeHint {
        SizeHint::exact(self.items.len() - self.next)
    }
}

/// Any std iterator, viewed as a step. The last pulled item is kept so
/// `current()` can hand out clones of it.
pub struct IterSource<I: Iterator> {
    iter: Fuse<I>,
    current: Deferred<I::Item>,
    state: StepState,
}

impl<I: Iterator> IterSource<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter: iter.fuse(),
            current: Deferred::new(),
            state: StepState::Fresh,
        }
    }
}

impl<I> Step for IterSource<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() {
            return false;
        }
        match self.iter.next() {
            Some(item) => {
                self.current.set(item);
                self.state.record(true)
            }
            None => {
                self.current.clear();
                self.state.record(false)
            }
        }
    }

    fn current(&self) -> I::Item {
        self.state.ensure_active();
        self.current.get().clone()
    }

    fn measure(&self) -> SizeHint {
        SizeHint::from_iter_hint(self.iter.size_hint())
    }
}

/// One value, repeated forever or a fixed number of times.
#[derive(Debug)]
pub struct RepeatSource<T> {
    value: T,
    remaining: Option<usize>,
    state: StepState,
}

impl<T> RepeatSource<T> {
    pub fn forever(value: T) -> Self {
        Self {
            value,
            remaining: None,
            state: StepState::Fresh,
        }
    }

    pub fn times(value: T, count: usize) -> Self {
        Self {
            value,
            remaining: Some(count),
            state: StepState::Fresh,
        }
    }
}

impl<T: Clone> Step for RepeatSource<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() {
            return false;
        }
        match &mut self.remaining {
            Some(0) => self.state.record(false),
            Some(n) => {
                *n -= 1;
                self.state.record(true)
            }
            None => self.state.record(true),
        }
    }

    fn current(&self) -> T {
        self.state.ensure_active();
        self.value.clone()
    }

    fn measure(&self) -> SizeHint {
        match self.remaining {
            _ if self.state.is_exhausted() => SizeHint::exact(0),
            Some(n) => SizeHint::exact(n),
            None => SizeHint::unbounded(),
        }
    }
}

/// `count` values starting at `start`, `step` apart.
#[derive(Debug)]
pub struct RangeSource<T> {
    start: T,
    step: T,
    remaining: usize,
    current: Deferred<T>,
    state: StepState,
}

impl<T> RangeSource<T> {
    pub fn new(start: T, count: usize, step: T) -> Self {
        Self {
            start,
            step,
            remaining: count,
            current: Deferred::new(),
            state: StepState::Fresh,
        }
    }
}

impl<T> Step for RangeSource<T>
where
    T: Copy + Add<Output = T>,
{
    type Item = T;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() || self.remaining == 0 {
            return self.state.record(false);
        }
        // The successor is computed lazily so the last element never
        // overflows into a value nobody asked for.
        let value = match self.current.try_get() {
            Some(&prev) => prev + self.step,
            None => self.start,
        };
        self.current.set(value);
        self.remaining -= 1;
        self.state.record(true)
    }

    fn current(&self) -> T {
        self.state.ensure_active();
        *self.current.get()
    }

    fn measure(&self) -> SizeHint {
        SizeHint::exact(self.remaining)
    }
}

/// An open-ended sequence: `seed`, `f(seed)`, `f(f(seed))`, ...
pub struct Successors<T, F> {
    value: Reassignable<T>,
    next: F,
    state: StepState,
}

impl<T, F> Successors<T, F> {
    pub fn new(seed: T, next: F) -> Self {
        Self {
            value: Reassignable::new(seed),
            next,
            state: StepState::Fresh,
        }
    }
}

impl<T, F> Step for Successors<T, F>
where
    T: Clone,
    F: FnMut(&T) -> T,
{
    type Item = T;

    fn advance(&mut self) -> bool {
        if self.state == StepState::Active {
            let next = (self.next)(self.value.get());
            self.value.assign(next);
        }
        self.state.record(true)
    }

    fn current(&self) -> T {
        self.state.ensure_active();
        self.value.get().clone()
    }

    fn measure(&self) -> SizeHint {
        SizeHint::unbounded()
    }
}

/// No elements.
#[derive(Debug)]
pub struct Empty<T> {
    state: StepState,
    _item: PhantomData<fn() -> T>,
}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        Self {
            state: StepState::Fresh,
            _item: PhantomData,
        }
    }
}

impl<T> Empty<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Step for Empty<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        self.state.record(false)
    }

    fn current(&self) -> T {
        usage_violation(if self.state.is_fresh() {
            UsageError::BeforeFirstAdvance
        } else {
            UsageError::AfterExhaustion
        })
    }

    fn measure(&self) -> SizeHint {
        SizeHint::exact(0)
    }
}

/// Exactly one element.
#[derive(Debug)]
pub struct Once<T> {
    value: T,
    state: StepState,
}

impl<T> Once<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            state: StepState::Fresh,
        }
    }
}

impl<T: Clone> Step for Once<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        let first = self.state.is_fresh();
        self.state.record(first)
    }

    fn current(&self) -> T {
        self.state.ensure_active();
        self.value.clone()
    }

    fn measure(&self) -> SizeHint {
        SizeHint::exact(usize::from(self.state.is_fresh()))
    }
}
