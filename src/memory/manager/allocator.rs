/*!
 * Memory Allocator Implementation
 * Allocation and deallocation logic
 */

use super::super::traits::{Allocator, MemoryInfo};
use super::super::types::{MemoryBlock, MemoryResult, MemorySnapshot, MemoryStats};
use super::layout::Release;
use super::MemoryManager;
use crate::core::types::{Address, Size};
use tracing::{debug, info, warn};

impl MemoryManager {
    /// Grant `size` bytes using first-fit placement.
    ///
    /// Fails with `NoSuitableBlock` without touching the block list when no
    /// free block is large enough.
    pub fn allocate(&self, size: Size) -> MemoryResult<Address> {
        let mut list = self.inner.lock();
        match list.first_fit(size) {
            Ok(start) => {
                debug!(start, size, blocks = list.blocks.len(), "Allocated block");
                Ok(start)
            }
            Err(e) => {
                warn!(size, error = %e, "Allocation rejected");
                Err(e)
            }
        }
    }

    /// Free the block starting at `start` and merge adjacent free blocks.
    ///
    /// Addresses that start no block are ignored.
    pub fn free(&self, start: Address) -> bool {
        let mut list = self.inner.lock();
        match list.release(start) {
            Release::Freed { length } => {
                debug!(start, length, blocks = list.blocks.len(), "Freed block");
                true
            }
            Release::AlreadyFree => {
                debug!(start, "Free of an already free block");
                false
            }
            Release::Unknown => {
                debug!(start, "Free of unknown address ignored");
                false
            }
        }
    }

    pub fn stats(&self) -> MemoryStats {
        let list = self.inner.lock();
        let allocatable = list.total_size - list.os_size;
        let used = list.used_bytes();
        let used_blocks = list.blocks.iter().filter(|b| b.is_used).count();

        MemoryStats {
            total_memory: list.total_size,
            os_reserved: list.os_size,
            used_memory: used,
            available_memory: allocatable - used,
            largest_free_block: list.largest_free(),
            used_blocks,
            free_blocks: list.blocks.len() - used_blocks,
            usage_percentage: if allocatable == 0 {
                0.0
            } else {
                used as f64 / allocatable as f64 * 100.0
            },
        }
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        let list = self.inner.lock();
        MemorySnapshot {
            total_size: list.total_size,
            os_size: list.os_size,
            blocks: list.blocks.clone(),
        }
    }

    /// Free every block, returning to the initial single free block
    pub fn clear(&self) {
        let mut list = self.inner.lock();
        let allocatable = list.total_size - list.os_size;
        let os_size = list.os_size;
        list.blocks.clear();
        list.blocks.push(MemoryBlock::free(os_size, allocatable));
        info!("Memory manager cleared");
    }
}

impl Allocator for MemoryManager {
    fn allocate(&self, size: Size) -> MemoryResult<Address> {
        MemoryManager::allocate(self, size)
    }

    fn free(&self, address: Address) -> bool {
        MemoryManager::free(self, address)
    }

    fn is_allocated(&self, address: Address) -> bool {
        self.inner
            .lock()
            .find(address)
            .map(|b| b.is_used)
            .unwrap_or(false)
    }

    fn block_size(&self, address: Address) -> Option<Size> {
        self.inner
            .lock()
            .find(address)
            .filter(|b| b.is_used)
            .map(|b| b.length)
    }
}

impl MemoryInfo for MemoryManager {
    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }

    fn snapshot(&self) -> MemorySnapshot {
        MemoryManager::snapshot(self)
    }
}
