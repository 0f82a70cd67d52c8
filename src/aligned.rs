use std::{
  alloc::{GlobalAlloc, Layout},
  ptr::{self, NonNull},
};

use log::{debug, trace};

use crate::{
  align::padded_size,
  block::{RawBlock, load_origin, store_origin},
  error::{AlignError, AlignResult},
  raw::{Malloc, RawAllocator},
};

/// Hands out blocks aligned to any power-of-two boundary on top of a
/// general-purpose allocator.
///
/// The allocator keeps no state of its own: the raw block address lives in
/// a header slot right before every aligned address it returns.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlignedAllocator<A = Malloc> {
  raw: A,
}

impl AlignedAllocator<Malloc> {
  pub const fn new() -> Self {
    Self { raw: Malloc }
  }
}

impl<A: RawAllocator> AlignedAllocator<A> {
  pub const fn with_raw(raw: A) -> Self {
    Self { raw }
  }

  pub fn raw(&self) -> &A {
    &self.raw
  }

  /// Allocates `size` bytes starting at a multiple of `alignment`.
  ///
  /// A zero `size` still reserves the header and padding, so it yields a
  /// distinct non-null address that must be passed to [`free`](Self::free).
  pub fn allocate(
    &self,
    size: usize,
    alignment: usize,
  ) -> AlignResult<NonNull<u8>> {
    let result = self.reserve(size, alignment);

    match &result {
      Ok(address) => trace!(
        "aligned allocate: size = {}, alignment = {}, address = {:?}",
        size, alignment, address
      ),
      Err(err) => debug!("aligned allocate failed: {}", err),
    }

    result
  }

  pub fn allocate_layout(
    &self,
    layout: Layout,
  ) -> AlignResult<NonNull<u8>> {
    self.allocate(layout.size(), layout.align())
  }

  /// Like [`allocate`](Self::allocate), with the aligned region zeroed.
  pub fn allocate_zeroed(
    &self,
    size: usize,
    alignment: usize,
  ) -> AlignResult<NonNull<u8>> {
    let address = self.allocate(size, alignment)?;
    unsafe { ptr::write_bytes(address.as_ptr(), 0, size) };

    Ok(address)
  }

  /// Returns the block behind `address` to the underlying allocator.
  ///
  /// A null `address` is ignored.
  ///
  /// # Safety
  ///
  /// A non-null `address` must have been returned by this allocator and not
  /// freed since. Anything else corrupts memory: the header is trusted as is.
  pub unsafe fn free(
    &self,
    address: *mut u8,
  ) {
    let Some(aligned) = NonNull::new(address) else {
      return;
    };

    trace!("aligned free: address = {:?}", aligned);
    unsafe { self.release(aligned) }
  }

  fn reserve(
    &self,
    size: usize,
    alignment: usize,
  ) -> AlignResult<NonNull<u8>> {
    let requested = padded_size(size, alignment)?;

    let start = self
      .raw
      .allocate(requested)
      .ok_or(AlignError::OutOfMemory { requested })?;

    let block = RawBlock::new(start, requested);

    unsafe {
      let aligned = block.aligned_start(alignment);
      store_origin(&block, aligned);

      Ok(aligned)
    }
  }

  unsafe fn release(
    &self,
    aligned: NonNull<u8>,
  ) {
    unsafe { self.raw.release(load_origin(aligned)) }
  }
}

// No logging on this path: a logger that allocates would re-enter it.
unsafe impl<A: RawAllocator + Sync> GlobalAlloc for AlignedAllocator<A> {
  unsafe fn alloc(
    &self,
    layout: Layout,
  ) -> *mut u8 {
    self
      .reserve(layout.size(), layout.align())
      .map_or(ptr::null_mut(), NonNull::as_ptr)
  }

  unsafe fn alloc_zeroed(
    &self,
    layout: Layout,
  ) -> *mut u8 {
    match self.reserve(layout.size(), layout.align()) {
      Ok(address) => unsafe {
        ptr::write_bytes(address.as_ptr(), 0, layout.size());
        address.as_ptr()
      },
      Err(_) => ptr::null_mut(),
    }
  }

  unsafe fn dealloc(
    &self,
    address: *mut u8,
    _layout: Layout,
  ) {
    if let Some(aligned) = NonNull::new(address) {
      unsafe { self.release(aligned) }
    }
  }
}

/// [`AlignedAllocator::allocate`] on top of `malloc`.
pub fn aligned_allocate(
  size: usize,
  alignment: usize,
) -> AlignResult<NonNull<u8>> {
  AlignedAllocator::new().allocate(size, alignment)
}

/// [`AlignedAllocator::free`] on top of `free`.
///
/// # Safety
///
/// `address` must be null or come from [`aligned_allocate`] and not have been
/// freed since.
pub unsafe fn aligned_free(address: *mut u8) {
  unsafe { AlignedAllocator::new().free(address) }
}
