use std::ptr::NonNull;

use libc::{c_void, free, malloc};

/// The general-purpose allocator aligned blocks are carved out of.
///
/// # Safety
///
/// `allocate` must return either `None` or a pointer to at least `size`
/// writable bytes that stay valid until passed to `release`.
pub unsafe trait RawAllocator {
  fn allocate(
    &self,
    size: usize,
  ) -> Option<NonNull<u8>>;

  /// # Safety
  ///
  /// `address` must come from `allocate` on this allocator and must not have
  /// been released already.
  unsafe fn release(
    &self,
    address: NonNull<u8>,
  );
}

/// `malloc(3)` / `free(3)` from the C library.
#[derive(Clone, Copy, Debug, Default)]
pub struct Malloc;

unsafe impl RawAllocator for Malloc {
  fn allocate(
    &self,
    size: usize,
  ) -> Option<NonNull<u8>> {
    NonNull::new(unsafe { malloc(size) } as *mut u8)
  }

  unsafe fn release(
    &self,
    address: NonNull<u8>,
  ) {
    unsafe { free(address.as_ptr() as *mut c_void) }
  }
}

unsafe impl<A: RawAllocator + ?Sized> RawAllocator for &A {
  fn allocate(
    &self,
    size: usize,
  ) -> Option<NonNull<u8>> {
    (**self).allocate(size)
  }

  unsafe fn release(
    &self,
    address: NonNull<u8>,
  ) {
    unsafe { (**self).release(address) }
  }
}
