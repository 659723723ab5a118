//! Terminal-layer errors.
//!
//! Inside the engine "nothing found" is just `advance() == false`; terminals
//! that must produce a value translate it into these.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExecError {
    #[error("sequence contains no elements")]
    NoElements,
    #[error("sequence contains more than one element")]
    MoreThanOne,
}

pub type Result<T> = std::result::Result<T, ExecError>;
