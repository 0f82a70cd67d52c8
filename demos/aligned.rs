use std::{alloc::Layout, io::Read, ptr};

use raligned::{AlignedAllocator, POINTER_WIDTH, padded_size};

/// Waits until the user presses ENTER.
/// Handy for poking at the process with `gdb` between steps.
fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

/// Prints the aligned address, the raw address stored in its header and how
/// far apart they are.
unsafe fn print_alloc(
  label: &str,
  size: usize,
  alignment: usize,
  address: *mut u8,
) {
  let header = unsafe { ptr::read_unaligned(address.sub(POINTER_WIDTH) as *const usize) };

  println!(
    "[{}] size = {}, alignment = {}, padded request = {:?}",
    label,
    size,
    alignment,
    padded_size(size, alignment),
  );
  println!(
    "[{}] aligned = {:#X}, origin header = {:#X}, offset = {}, addr % align = {}",
    label,
    address as usize,
    header,
    address as usize - header,
    address as usize % alignment,
  );
}

fn main() {
  // RUST_LOG=trace shows every allocate/free the library performs.
  env_logger::init();

  let allocator = AlignedAllocator::new();

  unsafe {
    // --------------------------------------------------------------------
    // 1) The textbook case: 100 bytes on a 16-byte boundary.
    // --------------------------------------------------------------------
    let first = allocator.allocate(100, 16).unwrap().as_ptr();
    println!("\n[1] Allocate 100 bytes aligned to 16");
    print_alloc("1", 100, 16, first);

    ptr::write_bytes(first, 0xAB, 100);
    println!("[1] Initialized the region with 0xAB");

    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 2) A page-aligned buffer, the kind O_DIRECT I/O asks for.
    // --------------------------------------------------------------------
    let page = allocator.allocate(8192, 4096).unwrap().as_ptr();
    println!("\n[2] Allocate 8 KiB aligned to a 4 KiB page");
    print_alloc("2", 8192, 4096, page);

    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 3) Alignment 1 still goes through the general formula.
    // --------------------------------------------------------------------
    let bytes = allocator.allocate(7, 1).unwrap().as_ptr();
    println!("\n[3] Allocate 7 bytes aligned to 1");
    print_alloc("3", 7, 1, bytes);

    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 4) An over-aligned type through its Layout.
    // --------------------------------------------------------------------
    #[repr(align(64))]
    struct CacheLine([u64; 8]);

    let layout = Layout::new::<CacheLine>();
    let line = allocator.allocate_layout(layout).unwrap().as_ptr() as *mut CacheLine;
    line.write(CacheLine([0x1122334455667788; 8]));
    println!("\n[4] Allocate a cache line via Layout");
    print_alloc("4", layout.size(), layout.align(), line as *mut u8);
    println!("[4] Value read back = 0x{:X}", (*line).0[7]);

    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 5) Rejected requests never reach malloc.
    // --------------------------------------------------------------------
    println!("\n[5] Allocate with alignment 3");
    match allocator.allocate(100, 3) {
      Ok(_) => println!("[5] Unexpectedly succeeded"),
      Err(err) => println!("[5] Rejected: {}", err),
    }

    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 6) Free everything. Each free reads the header and hands the raw
    //    address back to free(3).
    // --------------------------------------------------------------------
    allocator.free(first);
    allocator.free(page);
    allocator.free(bytes);
    allocator.free(line as *mut u8);
    allocator.free(ptr::null_mut());
    println!("\n[6] Freed all blocks (and a null pointer, which is a no-op)");

    println!("\n[7] End of example.");
  }
}
