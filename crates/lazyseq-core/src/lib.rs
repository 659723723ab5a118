#![forbid(unsafe_code)]
//! lazyseq-core: the vocabulary every other lazyseq crate speaks.
//!
//! - `hint`: the size-hint algebra steps use to report remaining length.
//! - `step`: the pull-based `Step` interface and its usage-state tracker.
//! - `error`: usage errors (fatal) and configuration errors (recoverable).
//! - `config`: serializable knobs consumed by the terminal layer.
//!
//! No concrete steps live here; see `lazyseq-steps`.

pub mod config;
pub mod error;
pub mod hint;
pub mod prelude;
pub mod step;

pub use config::{ReservePolicy, SeqConfig};
pub use error::{usage_violation, Error, Result, UsageError};
pub use hint::{HintKind, SizeHint};
pub use step::{Step, StepIter, StepState};
