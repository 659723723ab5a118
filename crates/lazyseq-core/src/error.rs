use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Step usage error: {0}")]
    Usage(#[from] UsageError),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Config(e.to_string())
    }
}

/// Contract violations by the caller of a step or slot.
///
/// These are programming errors, not data conditions: the engine raises them
/// through [`usage_violation`] and never returns them from `advance()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("current() used before first successful advance")]
    BeforeFirstAdvance,

    #[error("current() used after exhaustion")]
    AfterExhaustion,

    #[error("deferred slot read before it was set")]
    SlotUnset,
}

/// Abort with a message naming the violated contract.
#[cold]
#[track_caller]
pub fn usage_violation(err: UsageError) -> ! {
    panic!("step usage error: {err}")
}
