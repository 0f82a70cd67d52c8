use std::collections::HashMap;

use raligned::AlignedAllocator;

#[global_allocator]
static GLOBAL: AlignedAllocator = AlignedAllocator::new();

#[repr(align(256))]
struct Page([u8; 300]);

#[test]
fn test_collections_on_aligned_allocator() {
  let mut numbers: Vec<u64> = Vec::new();

  for i in 0..10_000 {
    numbers.push(i);
  }

  assert_eq!(numbers.iter().sum::<u64>(), 10_000 * 9_999 / 2);

  let mut names = HashMap::new();

  for i in 0..500 {
    names.insert(format!("key-{i}"), i);
  }

  assert_eq!(names["key-499"], 499);
}

#[test]
fn test_over_aligned_boxes() {
  let pages: Vec<Box<Page>> = (0..32).map(|i| Box::new(Page([i as u8; 300]))).collect();

  for (i, page) in pages.iter().enumerate() {
    assert_eq!(&**page as *const Page as usize % 256, 0);
    assert_eq!(page.0[299], i as u8);
  }
}

#[test]
fn test_zeroed_vec() {
  let zeros = vec![0u128; 4096];

  assert_eq!(zeros.as_ptr() as usize % std::mem::align_of::<u128>(), 0);
  assert!(zeros.iter().all(|&z| z == 0));
}
