//! Factory traits and the generic chained/joined assemblers.

use std::fmt;
use std::marker::PhantomData;

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::Step;

/// Element type produced by a factory's steps.
pub type ItemOf<F> = <<F as Factory>::Step as Step>::Item;

/// Builds independent step graphs on demand.
pub trait Factory {
    type Step: Step;

    /// A fresh step graph positioned before the first element.
    fn build(&self) -> Self::Step;

    /// The hint a freshly built graph would report.
    fn measure(&self) -> SizeHint {
        self.build().measure()
    }
}

impl<F: Factory + ?Sized> Factory for &F {
    type Step = F::Step;

    fn build(&self) -> F::Step {
        (**self).build()
    }

    fn measure(&self) -> SizeHint {
        (**self).measure()
    }
}

impl<F: Factory + ?Sized> Factory for Box<F> {
    type Step = F::Step;

    fn build(&self) -> F::Step {
        (**self).build()
    }

    fn measure(&self) -> SizeHint {
        (**self).measure()
    }
}

/// How to turn an upstream step into a downstream one.
///
/// `Args` are cloned into every build (predicates, projections, sets);
/// `Steady` is plain `Copy` configuration (counts, modes, policies).
pub trait Template<S: Step> {
    type Args: Clone;
    type Steady: Copy;
    type Output: Step;

    fn instantiate(upstream: S, args: Self::Args, steady: Self::Steady) -> Self::Output;
}

/// An upstream factory followed by one templated step.
pub struct Chained<U, K>
where
    U: Factory,
    K: Template<U::Step>,
{
    upstream: U,
    args: K::Args,
    steady: K::Steady,
    template: PhantomData<fn() -> K>,
}

impl<U, K> Chained<U, K>
where
    U: Factory,
    K: Template<U::Step>,
{
    pub fn new(upstream: U, args: K::Args, steady: K::Steady) -> Self {
        Self {
            upstream,
            args,
            steady,
            template: PhantomData,
        }
    }

    pub fn upstream(&self) -> &U {
        &self.upstream
    }
}

impl<U, K> Factory for Chained<U, K>
where
    U: Factory,
    K: Template<U::Step>,
{
    type Step = K::Output;

    fn build(&self) -> K::Output {
        K::instantiate(self.upstream.build(), self.args.clone(), self.steady)
    }
}

impl<U, K> Clone for Chained<U, K>
where
    U: Factory + Clone,
    K: Template<U::Step>,
{
    fn clone(&self) -> Self {
        Self::new(self.upstream.clone(), self.args.clone(), self.steady)
    }
}

impl<U, K> fmt::Debug for Chained<U, K>
where
    U: Factory + fmt::Debug,
    K: Template<U::Step>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chained")
            .field("upstream", &self.upstream)
            .field("step", &std::any::type_name::<K>())
            .finish()
    }
}

/// How to combine two upstream steps into one.
pub trait JoinTemplate<A: Step, B: Step> {
    type Args: Clone;
    type Steady: Copy;
    type Output: Step;

    fn instantiate(first: A, second: B, args: Self::Args, steady: Self::Steady) -> Self::Output;
}

/// Two upstream factories followed by one two-input step.
pub struct Joined<UA, UB, K>
where
    UA: Factory,
    UB: Factory,
    K: JoinTemplate<UA::Step, UB::Step>,
{
    upstreams: (UA, UB),
    args: K::Args,
    steady: K::Steady,
    template: PhantomData<fn() -> K>,
}

impl<UA, UB, K> Joined<UA, UB, K>
where
    UA: Factory,
    UB: Factory,
    K: JoinTemplate<UA::Step, UB::Step>,
{
    pub fn new(upstreams: (UA, UB), args: K::Args, steady: K::Steady) -> Self {
        Self {
            upstreams,
            args,
            steady,
            template: PhantomData,
        }
    }
}

impl<UA, UB, K> Factory for Joined<UA, UB, K>
where
    UA: Factory,
    UB: Factory,
    K: JoinTemplate<UA::Step, UB::Step>,
{
    type Step = K::Output;

    fn build(&self) -> K::Output {
        let (a, b) = &self.upstreams;
        K::instantiate(a.build(), b.build(), self.args.clone(), self.steady)
    }
}

impl<UA, UB, K> Clone for Joined<UA, UB, K>
where
    UA: Factory + Clone,
    UB: Factory + Clone,
    K: JoinTemplate<UA::Step, UB::Step>,
{
    fn clone(&self) -> Self {
        Self::new(self.upstreams.clone(), self.args.clone(), self.steady)
    }
}
