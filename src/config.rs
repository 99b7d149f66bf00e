//! Construction parameters for [`TripletDeque`](crate::TripletDeque).

use crate::error::{Error, Result};
use crate::utils::index_type::IndexType;

/// Segment capacity used by [`TripletDeque::new`](crate::TripletDeque::new).
pub const DEFAULT_TRIPLET_LENGTH: usize = 5;

/// Overall element ceiling used by [`TripletDeque::new`](crate::TripletDeque::new).
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Fixed shape of a deque, chosen once at construction.
///
/// | Field | Meaning | Default |
/// |-------|---------|---------|
/// | `triplet_length` | slots per segment, at least 1 | 5 |
/// | `max_size` | ceiling on live elements across all segments | 1000 |
///
/// ```
/// use triplet_deque::{DequeConfig, TripletDeque};
///
/// let config = DequeConfig::new().with_triplet_length(2).with_max_size(8);
/// let deque: TripletDeque<i32> = TripletDeque::with_config(config).unwrap();
/// assert_eq!(deque.triplet_length(), 2);
/// assert_eq!(deque.max_size(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DequeConfig {
    pub triplet_length: usize,
    pub max_size: usize,
}

impl DequeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            triplet_length: DEFAULT_TRIPLET_LENGTH,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Sets the number of slots per segment.
    #[must_use]
    pub const fn with_triplet_length(mut self, triplet_length: usize) -> Self {
        self.triplet_length = triplet_length;
        self
    }

    /// Sets the ceiling on live elements.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Checks that a deque with handle type `I` can be built from this configuration.
    ///
    /// Every linked segment except a sole empty one holds at least one element, so the arena
    /// never needs more than `max(max_size, 1)` segments. That count must stay below the handle
    /// sentinel.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `triplet_length` is zero or `max_size` is too large for `I`.
    pub fn validate<I: IndexType>(&self) -> Result {
        if self.triplet_length == 0 {
            return Err(Error::InvalidArgument("triplet length must be at least 1"));
        }
        if self.max_size.max(1) >= I::MAX_HANDLES {
            return Err(Error::InvalidArgument(
                "max size exceeds the segment handle range",
            ));
        }
        Ok(())
    }
}

impl Default for DequeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DequeConfig::default();
        assert_eq!(config.triplet_length, 5);
        assert_eq!(config.max_size, 1000);
        assert_eq!(config.validate::<u16>(), Ok(()));
    }

    #[test]
    fn test_config_zero_triplet_length_rejected() {
        let config = DequeConfig::new().with_triplet_length(0);
        assert!(matches!(
            config.validate::<u32>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_config_zero_max_size_accepted() {
        let config = DequeConfig::new().with_max_size(0);
        assert_eq!(config.validate::<u16>(), Ok(()));
    }

    #[test]
    fn test_config_handle_range() {
        let config = DequeConfig::new().with_max_size(70_000);
        assert!(config.validate::<u16>().is_err());
        assert!(config.validate::<u32>().is_ok());
        assert!(config.validate::<usize>().is_ok());
    }
}
