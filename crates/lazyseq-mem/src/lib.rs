#![deny(unsafe_code)]
//! lazyseq-mem: where step state and buffers live.
//!
//! - `slot`: deferred, reassignable and stored value holders.
//! - `buffer`: the `Buffer` binding terminals collect into.
//! - `erased`: `ErasedStep`, a type-erased step placed inline or on the heap.
//! - `tracking`: peak buffer-length tracking.
//!
//! `erased` is the only module in the workspace allowed to use `unsafe`.

pub mod buffer;
#[allow(unsafe_code)]
pub mod erased;
pub mod slot;
pub mod tracking;

pub use buffer::Buffer;
pub use erased::{ErasedStep, DEFAULT_INLINE_BYTES, INLINE_ALIGN};
pub use slot::{Deferred, Reassignable, Stored};
pub use tracking::PeakTracker;
