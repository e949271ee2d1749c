use thiserror::Error;

/// Failures reported by the checked container operations.
///
/// Plain lookups signal "not found" through `Option` and `bool` returns;
/// this type is reserved for the convenience accessors that promise an
/// element exists and for call-time argument validation.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The container holds no elements.
    #[error("container is empty")]
    Empty,
    /// No stored element satisfies the requested bound.
    #[error("no element satisfies the requested bound")]
    NoSuchBound,
    /// The lower bound of a range lies above its upper bound.
    #[error("range lower bound exceeds upper bound")]
    InvalidRange,
    /// `add` was called with a key that is already present.
    #[error("key is already present")]
    DuplicateKey,
}
