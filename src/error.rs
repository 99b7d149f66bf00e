//! Error type shared by every fallible deque operation.

/// Convenience alias used throughout the crate.
pub type Result<T = (), E = Error> = core::result::Result<T, E>;

/// Failure of a deque operation.
///
/// Every error is raised before the deque is touched: a failed call leaves slots, links and the
/// length exactly as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A construction parameter or an input element was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The deque already holds `max_size` elements.
    #[error("deque is full (max size {max_size})")]
    CapacityExceeded { max_size: usize },
    /// The deque holds no elements.
    #[error("deque is empty")]
    Empty,
}
