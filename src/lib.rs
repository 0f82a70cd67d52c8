//! # raligned - Aligned Allocation on Top of a General-Purpose Allocator
//!
//! This crate hands out memory aligned to any power-of-two boundary while
//! borrowing the actual memory from an ordinary allocator (`malloc` by
//! default) that only knows about byte counts.
//!
//! ## Overview
//!
//! Every request is padded, the first suitable boundary inside the padded
//! block is handed to the caller, and the block's real start is stashed
//! right in front of that boundary so it can be found again on release:
//!
//! ```text
//!   Single Aligned Allocation (alignment = 16, size = 100, 64 bit):
//!
//!   raw start                 aligned start
//!   0x1007                    0x1010
//!   ▼                         ▼
//!   ┌──────┬─────────────────┬────────────────────────────────┬──────────┐
//!   │ slack│  Origin Header  │          User Data             │  slack   │
//!   │ 1 B  │  8 B = 0x1007   │          100 bytes             │  14 B    │
//!   └──────┴─────────────────┴────────────────────────────────┴──────────┘
//!   │◄──────────────────── 100 + 15 + 8 = 123 bytes ─────────────────────►│
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   raligned
//!   ├── align      - Boundary arithmetic (align_down!, padded_size)
//!   ├── block      - Raw block and origin header access (internal)
//!   ├── raw        - Underlying allocator seam (RawAllocator, Malloc)
//!   ├── aligned    - AlignedAllocator implementation
//!   └── error      - AlignError
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use raligned::AlignedAllocator;
//!
//! let allocator = AlignedAllocator::new();
//!
//! let address = allocator.allocate(100, 64).unwrap();
//! assert_eq!(address.as_ptr() as usize % 64, 0);
//!
//! unsafe { allocator.free(address.as_ptr()) };
//! ```
//!
//! ## How It Works
//!
//! For an alignment `A` and pointer width `W` the underlying allocator is
//! asked for `size + (A - 1) + W` bytes. Starting from `raw + (A - 1) + W`
//! and clearing the low bits lands on a boundary that is at least `W` bytes
//! past `raw` and leaves `size` bytes before the end of the block:
//!
//! ```text
//!   raw            raw + W                      raw + (A - 1) + W
//!   │              │                            │
//!   ▼              ▼                            ▼
//!   ├──────────────┼────────────────────────────┤
//!   │ header room  │  A - 1 bytes of slide room │
//!   └──────────────┴────────────────────────────┘
//!                     ▲
//!                     └── exactly one multiple of A falls in here
//! ```
//!
//! Release reads the `W` bytes in front of the aligned address and passes
//! that value straight back to the underlying allocator.
//!
//! ## Limitations
//!
//! - **No validation on free**: foreign or double-freed addresses are
//!   undefined behavior, exactly like `free(3)`
//! - **Thread safety is borrowed**: the allocator adds no locking and is as
//!   thread safe as its underlying allocator
//! - **Unix-only default**: `Malloc` requires `libc`
//!
//! ## Safety
//!
//! Allocation is safe to call; releasing memory is `unsafe` because the
//! header in front of the address is trusted as is.

pub mod align;
mod aligned;
mod block;
mod error;
mod raw;

pub use align::{POINTER_WIDTH, extra_bytes, is_valid_alignment, padded_size};
pub use aligned::{AlignedAllocator, aligned_allocate, aligned_free};
pub use error::{AlignError, AlignResult};
pub use raw::{Malloc, RawAllocator};
