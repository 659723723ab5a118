#![forbid(unsafe_code)]
//! lazyseq: lazy, re-runnable sequence pipelines.
//!
//! A pipeline is described once as a [`Query`] and run any number of times;
//! every run builds an independent graph of [`Step`]s that pull elements on
//! demand. Terminals (`to_vec`, `count`, `first`, ...) come from
//! [`Terminal`] or a configured [`Runner`].
//!
//! ```
//! use lazyseq::prelude::*;
//!
//! let data = [2, 3, 4, 5, 6, 7, 8, 9, 2, 0];
//! let odd = Query::from_slice(&data).filter(|x| **x % 2 == 1).sort();
//! assert_eq!(odd.to_vec(), vec![&3, &5, &7, &9]);
//! assert_eq!(odd.count(), 4);
//! ```

pub use lazyseq_chain as chain;
pub use lazyseq_core as core;
pub use lazyseq_exec as exec;
pub use lazyseq_mem as mem;
pub use lazyseq_steps as steps;

pub use lazyseq_chain::{ErasedFactory, Factory, ItemOf, Query};
pub use lazyseq_core::{Error, HintKind, ReservePolicy, SeqConfig, SizeHint, Step, StepIter};
pub use lazyseq_exec::{ExecError, Runner, Terminal};
pub use lazyseq_mem::{Buffer, Deferred, ErasedStep};

pub mod prelude {
    pub use lazyseq_chain::{Factory, Query};
    pub use lazyseq_core::prelude::*;
    pub use lazyseq_exec::{ExecError, Runner, Terminal};
    pub use lazyseq_mem::Buffer;
}
