/*!
 * Memory Management
 *
 * Contiguous first-fit allocator over a simulated address space.
 *
 * ## Layout
 *
 * - `[0, os_size)` is reserved for the operating system and never handed out
 * - `[os_size, total_size)` is tiled by address-ordered blocks, each used or free
 *
 * ## Features
 *
 * - **First-fit**: the lowest-addressed free block large enough wins
 * - **Block splitting**: the unused tail of a chosen block stays free right after it
 * - **Coalescing**: every free merges all adjacent free blocks
 * - **Memory pressure tracking**: Medium at 60%, High at 80%, Critical at 95%
 */

mod allocator;
mod layout;

use super::types::{MemoryBlock, MemoryResult};
use crate::core::limits::{DEFAULT_OS_MEMORY, DEFAULT_TOTAL_MEMORY};
use crate::core::types::Size;
use layout::BlockList;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// Memory manager
///
/// Cheap to clone: clones share the same block list. Every mutating call takes
/// the block list's exclusive lock for its whole body.
pub struct MemoryManager {
    inner: Arc<Mutex<BlockList>>,
    total_size: Size,
    os_size: Size,
}

impl MemoryManager {
    /// Create a manager owning `[os_size, total_size)`
    pub fn new(total_size: Size, os_size: Size) -> MemoryResult<Self> {
        let list = BlockList::new(total_size, os_size)?;
        info!(
            total_size,
            os_size, "Memory manager initialized with first-fit allocator"
        );
        Ok(Self::from_list(list))
    }

    /// Create a manager from an explicit block layout (validated)
    pub fn from_blocks(
        total_size: Size,
        os_size: Size,
        blocks: Vec<MemoryBlock>,
    ) -> MemoryResult<Self> {
        Ok(Self::from_list(BlockList::from_blocks(
            total_size, os_size, blocks,
        )?))
    }

    fn from_list(list: BlockList) -> Self {
        Self {
            total_size: list.total_size,
            os_size: list.os_size,
            inner: Arc::new(Mutex::new(list)),
        }
    }

    /// Copy of the current block list
    pub fn blocks(&self) -> Vec<MemoryBlock> {
        self.inner.lock().blocks.clone()
    }

    /// Verify the tiling and coalescing invariants
    pub fn check_invariants(&self) -> MemoryResult<()> {
        self.inner.lock().validate()
    }
}

impl Clone for MemoryManager {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            total_size: self.total_size,
            os_size: self.os_size,
        }
    }
}

impl std::fmt::Debug for MemoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryManager")
            .field("total_size", &self.total_size)
            .field("os_size", &self.os_size)
            .field("blocks", &self.inner.lock().blocks.len())
            .finish()
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        // Defaults always leave an allocatable region
        Self::from_list(BlockList {
            total_size: DEFAULT_TOTAL_MEMORY,
            os_size: DEFAULT_OS_MEMORY,
            blocks: vec![MemoryBlock::free(
                DEFAULT_OS_MEMORY,
                DEFAULT_TOTAL_MEMORY - DEFAULT_OS_MEMORY,
            )],
        })
    }
}
