//! `Terminal`: the runner's operations as methods on every factory.
//!
//! Each call uses a fresh `Runner` with `SeqConfig::default()`; use a
//! configured `Runner` directly to change hand-off or preallocation.

use std::borrow::Borrow;
use std::iter::Sum;

use lazyseq_chain::factory::{Factory, ItemOf};
use lazyseq_mem::buffer::Buffer;

use crate::error::Result;
use crate::runner::Runner;

pub trait Terminal: Factory + Sized {
    fn to_vec(&self) -> Vec<ItemOf<Self>> {
        Runner::default().to_vec(self)
    }

    fn collect_into<B>(&self, buf: B) -> B
    where
        B: Buffer<Item = ItemOf<Self>>,
    {
        Runner::default().collect_into(self, buf)
    }

    fn count(&self) -> usize {
        Runner::default().count(self)
    }

    fn sum_f64(&self) -> f64
    where
        ItemOf<Self>: Borrow<f64>,
    {
        Runner::default().sum_f64(self)
    }

    fn sum<T>(&self) -> T
    where
        T: Sum<ItemOf<Self>>,
    {
        Runner::default().sum(self)
    }

    fn first(&self) -> Result<ItemOf<Self>> {
        Runner::default().first(self)
    }

    fn last(&self) -> Result<ItemOf<Self>> {
        Runner::default().last(self)
    }

    fn single(&self) -> Result<ItemOf<Self>> {
        Runner::default().single(self)
    }

    fn aggregate<G>(&self, fold: G) -> Result<ItemOf<Self>>
    where
        G: FnMut(ItemOf<Self>, ItemOf<Self>) -> ItemOf<Self>,
    {
        Runner::default().aggregate(self, fold)
    }

    fn aggregate_seeded<A, G>(&self, seed: A, fold: G) -> A
    where
        G: FnMut(A, ItemOf<Self>) -> A,
    {
        Runner::default().aggregate_seeded(self, seed, fold)
    }

    fn aggregate_mapped<A, M, G>(&self, first: M, fold: G) -> Result<A>
    where
        M: FnOnce(ItemOf<Self>) -> A,
        G: FnMut(A, ItemOf<Self>) -> A,
    {
        Runner::default().aggregate_mapped(self, first, fold)
    }

    fn min(&self) -> Result<ItemOf<Self>>
    where
        ItemOf<Self>: Ord,
    {
        Runner::default().min(self)
    }

    fn max(&self) -> Result<ItemOf<Self>>
    where
        ItemOf<Self>: Ord,
    {
        Runner::default().max(self)
    }

    fn contains<V>(&self, value: &V) -> bool
    where
        ItemOf<Self>: Borrow<V>,
        V: PartialEq + ?Sized,
    {
        Runner::default().contains(self, value)
    }
}

impl<F: Factory> Terminal for F {}
