#![forbid(unsafe_code)]
//! lazyseq-exec: terminal operations.
//!
//! A terminal builds one step graph from a factory and drives it to an
//! answer. `Runner` carries the `SeqConfig` that decides whether caching
//! steps may hand their buffers off; `Terminal` puts the same operations on
//! every factory with the default configuration.

pub mod error;
pub mod metrics;
pub mod runner;
pub mod terminal;

pub use error::{ExecError, Result};
pub use runner::Runner;
pub use terminal::Terminal;
