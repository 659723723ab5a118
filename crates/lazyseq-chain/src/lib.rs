#![forbid(unsafe_code)]
//! lazyseq-chain: reusable pipeline descriptions.
//!
//! A *factory* describes a pipeline and builds a fresh step graph on every
//! `build()`. Factories are immutable, so one description can be executed
//! any number of times.
//!
//! Design:
//! - `Chained` pairs an upstream factory with a step *template*: the step
//!   type to instantiate plus its arguments. Templated arguments (closures,
//!   sets) are cloned into each build; steady arguments are `Copy` config.
//! - `Joined` does the same for two-input steps.
//! - `Query` is the builder surface users chain methods on.
//! - `ErasedFactory` hides the concrete pipeline type behind `ErasedStep`.

pub mod erased;
pub mod factory;
pub mod query;
pub mod sources;
pub mod templates;

pub use erased::ErasedFactory;
pub use factory::{Chained, Factory, ItemOf, JoinTemplate, Joined, Template};
pub use query::Query;
pub use sources::{EmptyOf, FromIter, FromShared, FromSlice, OnceOf, RangeOf, Repeat, SuccessorsOf};
