#![forbid(unsafe_code)]
//! lazyseq-steps: the concrete steps pipelines are made of.
//!
//! Sources produce elements, streaming steps transform them one at a time
//! while holding at most one buffered element, and caching steps
//! (`cache::{sort, minimums}`) drain their upstream into a buffer on first
//! use. Every step owns its upstream by value.
//!
//! Steps are assembled by hand or, more commonly, built by the factories in
//! `lazyseq-chain`.

pub mod cache;
pub mod counted;
pub mod filter;
pub mod flatten;
pub mod join;
pub mod map;
pub mod source;
pub mod take;
pub mod until;
pub mod window;

#[cfg(test)]
pub(crate) mod testutil;

pub use cache::minimums::{Minimums, MinimumsCompute};
pub use cache::sort::{Sort, SortCompute};
pub use cache::{Cached, Compute};
pub use counted::Counted;
pub use filter::Filter;
pub use flatten::Flatten;
pub use join::concat::Concat;
pub use join::membership::{Membership, MembershipMode};
pub use join::zip::Zip;
pub use map::{Map, SelectOwned, SelectRef};
pub use source::{
    Empty, IterSource, Once, RangeSource, RepeatSource, SharedSource, SliceSource, Successors,
};
pub use take::{Skip, Take};
pub use until::{Until, UntilMode};
pub use window::pairwise::Pairwise;
pub use window::replay::CloseWithFirst;
pub use window::scan::Scan;

pub use lazyseq_core::step::{Step, StepIter};
