//! Factories whose concrete pipeline type is hidden.
//!
//! `ErasedFactory<'a, T>` keeps the description behind an `Rc<dyn ...>` and
//! builds `ErasedStep<'a, T>` graphs, so differently shaped pipelines with the
//! same element type can be stored side by side or returned from functions.

use std::fmt;
use std::rc::Rc;

use lazyseq_core::config::SeqConfig;
use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::Step;
use lazyseq_mem::erased::ErasedStep;

use crate::factory::Factory;

/// Object-safe face of [`Factory`].
pub trait DynFactory<'a, T> {
    fn build_erased(&self, inline: bool) -> ErasedStep<'a, T>;
    fn measure_erased(&self) -> SizeHint;
}

impl<'a, F, T> DynFactory<'a, T> for F
where
    F: Factory,
    F::Step: Step<Item = T> + 'a,
{
    fn build_erased(&self, inline: bool) -> ErasedStep<'a, T> {
        let step = self.build();
        if inline {
            ErasedStep::new(step)
        } else {
            ErasedStep::new_boxed(step)
        }
    }

    fn measure_erased(&self) -> SizeHint {
        self.measure()
    }
}

pub struct ErasedFactory<'a, T> {
    inner: Rc<dyn DynFactory<'a, T> + 'a>,
    inline: bool,
}

impl<'a, T> ErasedFactory<'a, T> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Factory + 'a,
        F::Step: Step<Item = T> + 'a,
    {
        Self::with_config(factory, &SeqConfig::default())
    }

    /// Honors `cfg.inline_erasure`.
    pub fn with_config<F>(factory: F, cfg: &SeqConfig) -> Self
    where
        F: Factory + 'a,
        F::Step: Step<Item = T> + 'a,
    {
        Self {
            inner: Rc::new(factory),
            inline: cfg.inline_erasure,
        }
    }

    pub fn inline_enabled(&self) -> bool {
        self.inline
    }
}

impl<'a, T> Factory for ErasedFactory<'a, T> {
    type Step = ErasedStep<'a, T>;

    fn build(&self) -> ErasedStep<'a, T> {
        self.inner.build_erased(self.inline)
    }

    fn measure(&self) -> SizeHint {
        self.inner.measure_erased()
    }
}

impl<T> Clone for ErasedFactory<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            inline: self.inline,
        }
    }
}

impl<T> fmt::Debug for ErasedFactory<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedFactory")
            .field("inline", &self.inline)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::Chained;
    use crate::sources::{FromSlice, RangeOf};
    use crate::templates::{SkipOp, TakeOp};

    #[test]
    fn test_erased_factories_share_a_type() {
        let data = [1, 2, 3, 4, 5];
        let head: Chained<FromSlice<'_, i32>, TakeOp> = Chained::new(FromSlice::new(&data), (), 2);
        let tail: Chained<FromSlice<'_, i32>, SkipOp> = Chained::new(FromSlice::new(&data), (), 3);

        let parts: Vec<ErasedFactory<'_, &i32>> =
            vec![ErasedFactory::new(head), ErasedFactory::new(tail)];
        let got: Vec<Vec<i32>> = parts
            .iter()
            .map(|f| f.build().items().copied().collect())
            .collect();
        assert_eq!(got, vec![vec![1, 2], vec![4, 5]]);
        assert_eq!(parts[1].measure(), SizeHint::exact(2));
    }

    #[test]
    fn test_inline_switch_from_config() {
        let cfg = SeqConfig {
            inline_erasure: false,
            ..SeqConfig::default()
        };
        let heap = ErasedFactory::with_config(RangeOf::new(0u32, 3, 1), &cfg);
        let step = heap.build();
        assert!(!step.is_inline());
        assert_eq!(step.items().collect::<Vec<_>>(), vec![0, 1, 2]);

        let inline = ErasedFactory::new(RangeOf::new(0u32, 3, 1));
        assert!(inline.inline_enabled());
        assert!(inline.build().is_inline());
        assert_eq!(inline.clone().build().items().count(), 3);
    }
}
