use std::ptr::{self, NonNull};

use crate::align::{POINTER_WIDTH, aligned_offset};

/// Memory obtained from the underlying allocator for one aligned allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawBlock {
  pub start: NonNull<u8>,
  pub size: usize,
}

impl RawBlock {
  pub fn new(
    start: NonNull<u8>,
    size: usize,
  ) -> Self {
    Self { start, size }
  }

  /// First address inside the block that is a multiple of `alignment` and
  /// leaves a full header slot in front of it.
  ///
  /// # Safety
  ///
  /// `alignment` must be a power of two and the block must be at least
  /// `extra_bytes(alignment)` long.
  pub unsafe fn aligned_start(
    &self,
    alignment: usize,
  ) -> NonNull<u8> {
    let offset = aligned_offset(self.start.as_ptr() as usize, alignment);
    debug_assert!(offset >= POINTER_WIDTH && offset <= self.size);

    unsafe { self.start.add(offset) }
  }
}

/// Writes the raw block start into the slot right before `aligned`.
///
/// The slot is only pointer-aligned when the requested alignment is, so it is
/// written unaligned.
///
/// # Safety
///
/// `aligned` must come from [`RawBlock::aligned_start`] on `block`.
pub unsafe fn store_origin(
  block: &RawBlock,
  aligned: NonNull<u8>,
) {
  unsafe {
    let slot = aligned.as_ptr().sub(POINTER_WIDTH) as *mut *mut u8;
    ptr::write_unaligned(slot, block.start.as_ptr());
  }
}

/// Reads back the raw block start stored in front of `aligned`.
///
/// # Safety
///
/// `aligned` must have been prepared with [`store_origin`] and not released
/// since.
pub unsafe fn load_origin(aligned: NonNull<u8>) -> NonNull<u8> {
  unsafe {
    let slot = aligned.as_ptr().sub(POINTER_WIDTH) as *const *mut u8;
    NonNull::new_unchecked(ptr::read_unaligned(slot))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::align::extra_bytes;

  #[test]
  fn test_header_round_trip() {
    for alignment in [1usize, 2, 4, 8, 16, 32] {
      for shift in 0..alignment.max(POINTER_WIDTH) {
        let size = 8 + extra_bytes(alignment);
        let mut buffer = vec![0u8; size + shift];

        unsafe {
          let start = NonNull::new_unchecked(buffer.as_mut_ptr().add(shift));
          let block = RawBlock::new(start, size);
          let aligned = block.aligned_start(alignment);

          assert_eq!(aligned.as_ptr() as usize % alignment, 0);
          assert!(aligned.as_ptr() as usize >= start.as_ptr() as usize + POINTER_WIDTH);

          store_origin(&block, aligned);
          assert_eq!(load_origin(aligned), start);
        }
      }
    }
  }

  #[test]
  fn test_header_does_not_touch_region() {
    let alignment = 16;
    let size = 32 + extra_bytes(alignment);
    let mut buffer = vec![0xAAu8; size];

    unsafe {
      let start = NonNull::new_unchecked(buffer.as_mut_ptr());
      let block = RawBlock::new(start, size);
      let aligned = block.aligned_start(alignment);

      store_origin(&block, aligned);

      let region = std::slice::from_raw_parts(aligned.as_ptr(), 32);
      assert!(region.iter().all(|&byte| byte == 0xAA));
    }
  }
}
