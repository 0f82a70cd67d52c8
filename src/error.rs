//! Errors returned by aligned allocation.

use thiserror::Error;

/// Result type for aligned allocation.
pub type AlignResult<T> = Result<T, AlignError>;

/// Reasons an aligned allocation request can fail.
///
/// Every variant is detected or propagated without retrying, and none of
/// them leaves a raw block behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AlignError {
  /// The alignment is not a power of two (zero included).
  #[error("invalid alignment {alignment}: must be a power of two")]
  InvalidAlignment { alignment: usize },

  /// The padded request does not fit in `usize`.
  #[error("size {size} with alignment {alignment} overflows the padded request")]
  SizeOverflow { size: usize, alignment: usize },

  /// The underlying allocator could not provide the padded block.
  #[error("out of memory: underlying allocator refused {requested} bytes")]
  OutOfMemory { requested: usize },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display() {
    assert_eq!(
      AlignError::InvalidAlignment { alignment: 3 }.to_string(),
      "invalid alignment 3: must be a power of two"
    );
    assert_eq!(
      AlignError::OutOfMemory { requested: 123 }.to_string(),
      "out of memory: underlying allocator refused 123 bytes"
    );
  }
}
