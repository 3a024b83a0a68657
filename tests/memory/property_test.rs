/*!
 * Allocator Property Tests
 * Tiling and coalescing hold across arbitrary allocate/free sequences
 */

use os_scheduler_sim::core::types::Address;
use os_scheduler_sim::MemoryManager;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Allocate(usize),
    /// Index into the live allocations, wrapped
    Free(usize),
    /// Arbitrary address, usually not a block start
    FreeRaw(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1usize..300).prop_map(Op::Allocate),
        3 => any::<usize>().prop_map(Op::Free),
        1 => (0usize..2048).prop_map(Op::FreeRaw),
    ]
}

proptest! {
    #[test]
    fn blocks_always_tile_and_never_leave_adjacent_free(ops in prop::collection::vec(op(), 1..64)) {
        let mm = MemoryManager::new(2048, 128).unwrap();
        let mut live: Vec<(Address, usize)> = Vec::new();

        for op in ops {
            match op {
                Op::Allocate(size) => {
                    if let Ok(start) = mm.allocate(size) {
                        live.push((start, size));
                    }
                }
                Op::Free(i) if !live.is_empty() => {
                    let (start, _) = live.remove(i % live.len());
                    prop_assert!(mm.free(start));
                }
                Op::Free(_) => {}
                Op::FreeRaw(addr) => {
                    if mm.free(addr) {
                        live.retain(|&(start, _)| start != addr);
                    }
                }
            }

            prop_assert!(mm.check_invariants().is_ok());
            let used: usize = live.iter().map(|&(_, size)| size).sum();
            prop_assert_eq!(mm.stats().used_memory, used);
        }

        for (start, _) in live {
            prop_assert!(mm.free(start));
        }
        prop_assert_eq!(mm.blocks().len(), 1);
    }

    #[test]
    fn first_fit_returns_lowest_fitting_hole(size in 1usize..200) {
        let mm = MemoryManager::new(1024, 0).unwrap();
        let a = mm.allocate(100).unwrap();
        mm.allocate(50).unwrap();
        mm.free(a);

        let start = mm.allocate(size).unwrap();
        if size <= 100 {
            prop_assert_eq!(start, 0);
        } else {
            prop_assert_eq!(start, 150);
        }
    }
}
