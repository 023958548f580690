use thiserror::Error;

/// Error type for product store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The in-process lock was poisoned by a panicking writer.
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// An aggregate did not fit its numeric type.
    #[error("numeric overflow during {0}")]
    Overflow(&'static str),
    /// The backing store could not be reached or timed out.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
