/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::types::*;
use crate::core::types::{Address, Size};

/// Memory allocator interface
pub trait Allocator: Send + Sync {
    /// Grant `size` bytes, returning the start address of the granted block
    fn allocate(&self, size: Size) -> MemoryResult<Address>;

    /// Release the block starting at `address`.
    ///
    /// Unknown addresses are ignored; returns whether a used block was released.
    fn free(&self, address: Address) -> bool;

    /// Check if `address` is the start of an allocated block
    fn is_allocated(&self, address: Address) -> bool;

    /// Length of the allocated block starting at `address`
    fn block_size(&self, address: Address) -> Option<Size>;
}

/// Memory statistics provider
pub trait MemoryInfo: Send + Sync {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Copy of the block list for serialization
    fn snapshot(&self) -> MemorySnapshot;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
