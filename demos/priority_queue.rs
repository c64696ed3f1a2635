//! Soft heap as a plain priority queue.
//!
//! Inserts ten elements with random keys and extracts them again, printing
//! the tree list after every step. Run with `RUST_LOG=trace` to also see
//! the heap's internal melds and unlinks.

use rand::Rng;
use rust_soft_heap::soft_heap::SoftHeap;

fn main() {
    env_logger::init();

    let mut rng = rand::thread_rng();
    let mut heap = SoftHeap::default();
    for value in 0..10 {
        let key = rng.gen_range(0..100);
        println!("inserted: key={}, value={}", key, value);
        heap.insert(key, value);
    }
    print!("{}", heap.dump());

    while let Some(entry) = heap.extract_min_entry() {
        println!(
            "extracted: key={}, value={}, current key={}",
            entry.key, entry.item, entry.current_key
        );
        print!("{}", heap.dump());
    }
}
