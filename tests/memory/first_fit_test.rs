/*!
 * First-Fit Allocator Tests
 * Placement, splitting and coalescing against fixed layouts
 */

use os_scheduler_sim::memory::{Allocator, MemoryBlock, MemoryError, MemoryInfo, MemoryPressure};
use os_scheduler_sim::MemoryManager;
use pretty_assertions::assert_eq;

/// `[free 10@100, used 5@110, free 20@115]`
fn fragmented() -> MemoryManager {
    MemoryManager::from_blocks(
        135,
        100,
        vec![
            MemoryBlock::free(100, 10),
            MemoryBlock::used(110, 5),
            MemoryBlock::free(115, 20),
        ],
    )
    .unwrap()
}

#[test]
fn test_initial_layout_reserves_os_region() {
    let mm = MemoryManager::new(4096, 256).unwrap();
    assert_eq!(mm.blocks(), vec![MemoryBlock::free(256, 3840)]);
}

#[test]
fn test_first_fit_splits_first_large_enough_block() {
    let mm = fragmented();

    assert_eq!(mm.allocate(8), Ok(100));
    assert_eq!(
        mm.blocks(),
        vec![
            MemoryBlock::used(100, 8),
            MemoryBlock::free(108, 2),
            MemoryBlock::used(110, 5),
            MemoryBlock::free(115, 20),
        ]
    );
}

#[test]
fn test_first_fit_skips_small_holes() {
    let mm = fragmented();

    assert_eq!(mm.allocate(12), Ok(115));
    assert_eq!(mm.blocks()[2], MemoryBlock::used(115, 12));
    assert_eq!(mm.blocks()[3], MemoryBlock::free(127, 8));
}

#[test]
fn test_exact_fit_marks_in_place() {
    let mm = fragmented();

    assert_eq!(mm.allocate(10), Ok(100));
    assert_eq!(mm.blocks().len(), 3);
    assert_eq!(mm.blocks()[0], MemoryBlock::used(100, 10));
}

#[test]
fn test_free_coalesces_neighbours() {
    let mm = fragmented();
    mm.allocate(8).unwrap();

    assert!(mm.free(100));
    assert_eq!(mm.blocks()[0], MemoryBlock::free(100, 10));

    assert!(mm.free(110));
    assert_eq!(mm.blocks(), vec![MemoryBlock::free(100, 35)]);
}

#[test]
fn test_failed_allocation_leaves_state_untouched() {
    let mm = fragmented();
    let before = mm.blocks();

    assert_eq!(
        mm.allocate(21),
        Err(MemoryError::NoSuitableBlock {
            requested: 21,
            largest_free: 20
        })
    );
    assert_eq!(mm.blocks(), before);
}

#[test]
fn test_zero_size_rejected() {
    let mm = fragmented();
    assert_eq!(mm.allocate(0), Err(MemoryError::ZeroSize));
}

#[test]
fn test_unknown_free_is_noop() {
    let mm = fragmented();
    let before = mm.blocks();

    assert!(!mm.free(101));
    assert!(!mm.free(100));
    assert_eq!(mm.blocks(), before);
}

#[test]
fn test_invalid_layouts_rejected() {
    let gap = MemoryManager::from_blocks(
        135,
        100,
        vec![MemoryBlock::free(100, 10), MemoryBlock::used(111, 24)],
    );
    assert!(matches!(gap, Err(MemoryError::InvalidLayout { .. })));

    let adjacent_free = MemoryManager::from_blocks(
        135,
        100,
        vec![MemoryBlock::free(100, 10), MemoryBlock::free(110, 25)],
    );
    assert!(matches!(
        adjacent_free,
        Err(MemoryError::InvalidLayout { .. })
    ));

    assert!(MemoryManager::new(100, 100).is_err());
}

#[test]
fn test_stats_and_pressure() {
    let mm = MemoryManager::new(1100, 100).unwrap();
    mm.allocate(700).unwrap();

    let stats = mm.stats();
    assert_eq!(stats.used_memory, 700);
    assert_eq!(stats.available_memory, 300);
    assert_eq!(stats.largest_free_block, 300);
    assert_eq!(stats.used_blocks, 1);
    assert_eq!(stats.free_blocks, 1);
    assert_eq!(mm.pressure(), MemoryPressure::Medium);

    mm.allocate(260).unwrap();
    assert_eq!(mm.pressure(), MemoryPressure::Critical);
}

#[test]
fn test_allocator_trait_object() {
    let mm = MemoryManager::new(1024, 0).unwrap();
    let allocator: &dyn Allocator = &mm;

    let addr = allocator.allocate(64).unwrap();
    assert!(allocator.is_allocated(addr));
    assert_eq!(allocator.block_size(addr), Some(64));
    assert!(allocator.free(addr));
    assert!(!allocator.is_allocated(addr));
}
