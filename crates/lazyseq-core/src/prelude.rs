//! Convenient re-exports for downstream crates.

pub use crate::config::{ReservePolicy, SeqConfig};
pub use crate::error::{usage_violation, Error, Result, UsageError};
pub use crate::hint::{HintKind, SizeHint};
pub use crate::step::{Step, StepIter, StepState};
