use std::mem;

use crate::error::AlignError;

/// Number of bytes needed to store an address on the target machine.
pub const POINTER_WIDTH: usize = mem::size_of::<usize>();

/// Rounds `value` down to the nearest multiple of `alignment`.
///
/// `alignment` must be a power of two, otherwise the mask is meaningless.
///
/// # Examples
///
/// ```rust
/// use raligned::align_down;
///
/// assert_eq!(align_down!(0x101E, 16), 0x1010);
/// assert_eq!(align_down!(64, 64), 64);
/// assert_eq!(align_down!(13, 1), 13);
/// ```
#[macro_export]
macro_rules! align_down {
  ($value:expr, $alignment:expr) => {
    ($value) & !(($alignment) - 1)
  };
}

/// Returns `true` when `alignment` can be used as a bit mask boundary.
pub const fn is_valid_alignment(alignment: usize) -> bool {
  alignment.is_power_of_two()
}

/// Bytes requested on top of `size`: room to slide forward to the next
/// boundary plus the origin header slot.
///
/// Assumes `alignment` has already been validated.
pub const fn extra_bytes(alignment: usize) -> usize {
  (alignment - 1) + POINTER_WIDTH
}

/// Size of the raw block the underlying allocator is asked for.
///
/// # Examples
///
/// ```rust
/// use raligned::{POINTER_WIDTH, padded_size};
///
/// assert_eq!(padded_size(100, 16).unwrap(), 100 + 15 + POINTER_WIDTH);
/// assert!(padded_size(100, 3).is_err());
/// ```
pub fn padded_size(
  size: usize,
  alignment: usize,
) -> Result<usize, AlignError> {
  if !is_valid_alignment(alignment) {
    return Err(AlignError::InvalidAlignment { alignment });
  }

  size
    .checked_add(extra_bytes(alignment))
    .ok_or(AlignError::SizeOverflow { size, alignment })
}

/// Offset from the raw block start to the aligned region start.
///
/// The result always lies in `POINTER_WIDTH..=extra_bytes(alignment)`, so the
/// header slot right before it stays inside the raw block.
pub fn aligned_offset(
  raw_address: usize,
  alignment: usize,
) -> usize {
  let candidate = raw_address.wrapping_add(extra_bytes(alignment));

  align_down!(candidate, alignment).wrapping_sub(raw_address)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_align_down() {
    for alignment in [1usize, 2, 4, 8, 16, 64, 4096] {
      for value in 0..(alignment * 3) {
        let expected = (value / alignment) * alignment;
        assert_eq!(expected, align_down!(value, alignment));
      }
    }
  }

  #[test]
  fn test_valid_alignments() {
    for shift in 0..usize::BITS {
      assert!(is_valid_alignment(1 << shift));
    }

    for alignment in [0usize, 3, 5, 6, 7, 12, 100, 4095, usize::MAX] {
      assert!(!is_valid_alignment(alignment));
    }
  }

  #[test]
  fn test_extra_bytes() {
    assert_eq!(extra_bytes(1), POINTER_WIDTH);
    assert_eq!(extra_bytes(16), 15 + POINTER_WIDTH);

    for shift in 0..16 {
      let alignment = 1usize << shift;
      let extra = extra_bytes(alignment);

      assert!(extra >= POINTER_WIDTH);
      assert!(extra >= alignment - 1);
    }
  }

  #[test]
  fn test_padded_size() {
    assert_eq!(padded_size(0, 1), Ok(POINTER_WIDTH));
    assert_eq!(padded_size(100, 16), Ok(100 + 15 + POINTER_WIDTH));

    assert_eq!(
      padded_size(100, 3),
      Err(AlignError::InvalidAlignment { alignment: 3 })
    );
    assert_eq!(
      padded_size(1, 0),
      Err(AlignError::InvalidAlignment { alignment: 0 })
    );
    assert_eq!(
      padded_size(usize::MAX, 16),
      Err(AlignError::SizeOverflow {
        size: usize::MAX,
        alignment: 16,
      })
    );
  }

  #[test]
  fn test_aligned_offset_worked_example() {
    // 0x1007 + (15 + 8) = 0x101E, masked down to 0x1010.
    let raw = 0x1007;

    match POINTER_WIDTH {
      8 => {
        assert_eq!(extra_bytes(16), 23);
        assert_eq!(aligned_offset(raw, 16), 9);
        assert_eq!(raw + aligned_offset(raw, 16), 0x1010);
        assert_eq!(raw + aligned_offset(raw, 16) - POINTER_WIDTH, 0x1008);
      }
      // 0x1007 + 19 = 0x101A, masked down to 0x1010.
      4 => assert_eq!(raw + aligned_offset(raw, 16), 0x1010),
      _ => {}
    }
  }

  #[test]
  fn test_aligned_offset_bounds() {
    for alignment in [1usize, 2, 4, 8, 16, 64, 4096] {
      for raw in 0x1000..(0x1000 + alignment + 16) {
        let offset = aligned_offset(raw, alignment);

        assert_eq!((raw + offset) % alignment, 0);
        assert!(offset >= POINTER_WIDTH);
        assert!(offset <= extra_bytes(alignment));
      }
    }
  }
}
