//! Caching steps: multi-pass algorithms over a buffered copy of upstream.
//!
//! `Cached` defers the work to a `Compute` until the first `advance()` (or
//! the first hand-off request), then iterates the resulting buffer. The
//! buffer is computed at most once. `measure()` never triggers it.
//!
//! Hand-off: `harvest()` moves whatever has not been yielded yet out of the
//! step. A downstream caching step or terminal adopts it instead of copying
//! element by element.

pub mod minimums;
pub mod sort;

use std::mem;

use lazyseq_core::config::ReservePolicy;
use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::{Step, StepState};
use lazyseq_mem::slot::Deferred;

/// The one-shot computation behind a caching step.
pub trait Compute {
    type Item;

    /// Drain the input and produce the full result, in yield order.
    fn compute(&mut self) -> Vec<Self::Item>;

    /// Hint for the result before it exists.
    fn pending_hint(&self) -> SizeHint;
}

pub struct Cached<C: Compute> {
    source: C,
    buffer: Deferred<Vec<C::Item>>,
    pos: usize,
    state: StepState,
}

impl<C: Compute> Cached<C> {
    pub fn from_compute(source: C) -> Self {
        Self {
            source,
            buffer: Deferred::new(),
            pos: 0,
            state: StepState::Fresh,
        }
    }

    pub fn is_computed(&self) -> bool {
        self.buffer.is_set()
    }

    /// The computed buffer, including already yielded elements.
    pub fn buffer(&self) -> Option<&[C::Item]> {
        self.buffer.try_get().map(Vec::as_slice)
    }

    fn ensure_computed(&mut self) -> &mut Vec<C::Item> {
        if !self.buffer.is_set() {
            let buf = self.source.compute();
            #[cfg(feature = "tracing")]
            tracing::debug!(len = buf.len(), "cache computed");
            self.buffer.set(buf);
        }
        self.buffer.get_mut()
    }
}

impl<C> Step for Cached<C>
where
    C: Compute,
    C::Item: Clone,
{
    type Item = C::Item;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() {
            return false;
        }
        let len = self.ensure_computed().len();
        if self.pos < len {
            self.pos += 1;
            self.state.record(true)
        } else {
            self.state.record(false)
        }
    }

    fn current(&self) -> C::Item {
        self.state.ensure_active();
        self.buffer.get()[self.pos - 1].clone()
    }

    fn measure(&self) -> SizeHint {
        match self.buffer.try_get() {
            Some(buf) => SizeHint::exact(buf.len() - self.pos),
            None => self.source.pending_hint(),
        }
    }

    fn harvest(&mut self) -> Option<Vec<C::Item>> {
        let pos = self.pos;
        let buf = self.ensure_computed();
        let rest = if pos == 0 {
            mem::take(buf)
        } else {
            buf.split_off(pos)
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(len = rest.len(), "cache handed off");
        Some(rest)
    }
}

/// Pull everything out of `upstream`, adopting its buffer when it offers one.
pub fn drain_upstream<S: Step>(upstream: &mut S, reserve: ReservePolicy) -> Vec<S::Item> {
    if let Some(buf) = upstream.harvest() {
        #[cfg(feature = "tracing")]
        tracing::debug!(len = buf.len(), "adopted upstream buffer");
        return buf;
    }
    let mut buf = Vec::with_capacity(reserve.capacity_for(upstream.measure()));
    while upstream.advance() {
        buf.push(upstream.current());
    }
    buf
}
