//! Runner: builds a step graph from a factory and drives it to a result.
//!
//! Collection has two paths. With `cache_handoff` on, the runner first asks
//! the outermost step to `harvest()`; a caching step answers with its whole
//! remaining buffer, which the target container adopts. Otherwise (or when
//! the step has nothing to hand off) elements are pulled one at a time
//! through `advance`/`current`. Both paths yield the same elements in the
//! same order.

use std::borrow::Borrow;
use std::iter::Sum;

use lazyseq_chain::factory::{Factory, ItemOf};
use lazyseq_core::config::SeqConfig;
use lazyseq_core::step::{Step, StepIter};
use lazyseq_mem::buffer::Buffer;
use lazyseq_mem::tracking::PeakTracker;

use crate::error::{ExecError, Result};
use crate::metrics::emit_span;

#[derive(Debug, Default)]
pub struct Runner {
    cfg: SeqConfig,
    peak: PeakTracker,
}

impl Runner {
    pub fn new(cfg: SeqConfig) -> Self {
        Self {
            cfg,
            peak: PeakTracker::new(),
        }
    }

    pub fn config(&self) -> &SeqConfig {
        &self.cfg
    }

    /// Largest buffer any collecting terminal of this runner produced.
    pub fn peak_buffered(&self) -> usize {
        self.peak.peak()
    }

    pub fn to_vec<F: Factory>(&self, factory: &F) -> Vec<ItemOf<F>> {
        self.collect_into(factory, Vec::new())
    }

    /// Append every element to `buf` and return it.
    pub fn collect_into<F, B>(&self, factory: &F, mut buf: B) -> B
    where
        F: Factory,
        B: Buffer<Item = ItemOf<F>>,
    {
        let mut step = factory.build();
        self.drain_step(&mut step, &mut buf);
        buf
    }

    /// Drain an already built step into `buf`.
    pub fn drain_step<S, B>(&self, step: &mut S, buf: &mut B)
    where
        S: Step,
        B: Buffer<Item = S::Item>,
    {
        let harvested = if self.cfg.cache_handoff {
            step.harvest()
        } else {
            None
        };
        match harvested {
            Some(items) => {
                emit_span("handoff", &[("len", items.len())]);
                buf.adopt_vec(items);
            }
            None => {
                buf.reserve_for(step.measure(), self.cfg.max_prealloc);
                while step.advance() {
                    buf.push_item(step.current());
                }
                emit_span("copy", &[("len", buf.len_hint().unwrap_or(0))]);
            }
        }
        if let Some(len) = buf.len_hint() {
            self.peak.record_len(len);
        }
    }

    /// Number of elements. An exact hint answers without iterating.
    ///
    /// Exact hints are trusted. Iterator-backed sources derive theirs from
    /// `Iterator::size_hint`, so an iterator whose lower and upper bounds agree
    /// but are wrong is counted by its hint; pass it through `filter(|_| true)`
    /// or count with `iter().count()` to force a walk.
    pub fn count<F: Factory>(&self, factory: &F) -> usize {
        let mut step = factory.build();
        let hint = step.measure();
        if hint.is_exact() {
            return hint.reserve_hint();
        }
        let mut n = 0usize;
        while step.advance() {
            n += 1;
        }
        n
    }

    /// Compensated (Neumaier) sum of floating-point elements.
    pub fn sum_f64<F>(&self, factory: &F) -> f64
    where
        F: Factory,
        ItemOf<F>: Borrow<f64>,
    {
        let mut step = factory.build();
        let mut sum = 0.0f64;
        let mut comp = 0.0f64;
        while step.advance() {
            let x: f64 = *Borrow::<f64>::borrow(&step.current());
            let t = sum + x;
            if sum.abs() >= x.abs() {
                comp += (sum - t) + x;
            } else {
                comp += (x - t) + sum;
            }
            sum = t;
        }
        sum + comp
    }

    /// Plain sum through `std::iter::Sum`; zero for an empty sequence.
    pub fn sum<F, T>(&self, factory: &F) -> T
    where
        F: Factory,
        T: Sum<ItemOf<F>>,
    {
        StepIter::new(factory.build()).sum()
    }

    pub fn first<F: Factory>(&self, factory: &F) -> Result<ItemOf<F>> {
        let mut step = factory.build();
        if step.advance() {
            Ok(step.current())
        } else {
            Err(ExecError::NoElements)
        }
    }

    pub fn last<F: Factory>(&self, factory: &F) -> Result<ItemOf<F>> {
        let mut step = factory.build();
        if self.cfg.cache_handoff {
            if let Some(mut items) = step.harvest() {
                return items.pop().ok_or(ExecError::NoElements);
            }
        }
        let mut last = None;
        while step.advance() {
            last = Some(step.current());
        }
        last.ok_or(ExecError::NoElements)
    }

    /// The only element; errors when there are none or several.
    pub fn single<F: Factory>(&self, factory: &F) -> Result<ItemOf<F>> {
        let mut step = factory.build();
        if !step.advance() {
            return Err(ExecError::NoElements);
        }
        let only = step.current();
        if step.advance() {
            return Err(ExecError::MoreThanOne);
        }
        Ok(only)
    }

    /// Fold seeded with the first element.
    pub fn aggregate<F, G>(&self, factory: &F, fold: G) -> Result<ItemOf<F>>
    where
        F: Factory,
        G: FnMut(ItemOf<F>, ItemOf<F>) -> ItemOf<F>,
    {
        self.aggregate_mapped(factory, |first| first, fold)
    }

    /// Fold from an explicit seed; the seed itself for an empty sequence.
    pub fn aggregate_seeded<F, A, G>(&self, factory: &F, seed: A, mut fold: G) -> A
    where
        F: Factory,
        G: FnMut(A, ItemOf<F>) -> A,
    {
        let mut step = factory.build();
        let mut acc = seed;
        while step.advance() {
            acc = fold(acc, step.current());
        }
        acc
    }

    /// Fold whose accumulator starts as `first(element)`.
    pub fn aggregate_mapped<F, A, M, G>(&self, factory: &F, first: M, mut fold: G) -> Result<A>
    where
        F: Factory,
        M: FnOnce(ItemOf<F>) -> A,
        G: FnMut(A, ItemOf<F>) -> A,
    {
        let mut step = factory.build();
        if !step.advance() {
            return Err(ExecError::NoElements);
        }
        let mut acc = first(step.current());
        while step.advance() {
            acc = fold(acc, step.current());
        }
        Ok(acc)
    }

    /// Smallest element; the first of equal ones.
    pub fn min<F>(&self, factory: &F) -> Result<ItemOf<F>>
    where
        F: Factory,
        ItemOf<F>: Ord,
    {
        self.aggregate(factory, |best, x| if x < best { x } else { best })
    }

    /// Largest element; the first of equal ones.
    pub fn max<F>(&self, factory: &F) -> Result<ItemOf<F>>
    where
        F: Factory,
        ItemOf<F>: Ord,
    {
        self.aggregate(factory, |best, x| if x > best { x } else { best })
    }

    /// Stops at the first match.
    pub fn contains<F, V>(&self, factory: &F, value: &V) -> bool
    where
        F: Factory,
        ItemOf<F>: Borrow<V>,
        V: PartialEq + ?Sized,
    {
        let mut step = factory.build();
        while step.advance() {
            if Borrow::<V>::borrow(&step.current()) == value {
                return true;
            }
        }
        false
    }
}
