/*!
 * Block Layout
 * Address-ordered block list with first-fit placement and coalescing
 */

use super::super::types::{MemoryBlock, MemoryError, MemoryResult};
use crate::core::types::{Address, Size};

/// Outcome of releasing an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Release {
    /// A used block was marked free
    Freed { length: Size },
    /// The block was already free
    AlreadyFree,
    /// No block starts at that address
    Unknown,
}

/// Blocks tiling `[os_size, total_size)` in ascending address order
#[derive(Debug, Clone)]
pub(super) struct BlockList {
    pub total_size: Size,
    pub os_size: Size,
    pub blocks: Vec<MemoryBlock>,
}

impl BlockList {
    /// One free block spanning everything above the reserved region
    pub fn new(total_size: Size, os_size: Size) -> MemoryResult<Self> {
        if os_size >= total_size {
            return Err(MemoryError::layout(format!(
                "reserved region {} covers total size {}",
                os_size, total_size
            )));
        }
        Ok(Self {
            total_size,
            os_size,
            blocks: vec![MemoryBlock::free(os_size, total_size - os_size)],
        })
    }

    pub fn from_blocks(
        total_size: Size,
        os_size: Size,
        blocks: Vec<MemoryBlock>,
    ) -> MemoryResult<Self> {
        let list = Self {
            total_size,
            os_size,
            blocks,
        };
        list.validate()?;
        Ok(list)
    }

    /// First free block (address order) with room for `size`; splits off the remainder
    pub fn first_fit(&mut self, size: Size) -> MemoryResult<Address> {
        if size == 0 {
            return Err(MemoryError::ZeroSize);
        }

        let index = self
            .blocks
            .iter()
            .position(|b| b.is_free() && b.length >= size)
            .ok_or(MemoryError::NoSuitableBlock {
                requested: size,
                largest_free: self.largest_free(),
            })?;

        let block = &mut self.blocks[index];
        let start = block.start;
        block.is_used = true;

        if block.length > size {
            let remainder = MemoryBlock::free(start + size, block.length - size);
            block.length = size;
            self.blocks.insert(index + 1, remainder);
        }

        Ok(start)
    }

    /// Mark the block starting at `start` free and coalesce neighbours
    pub fn release(&mut self, start: Address) -> Release {
        let Ok(index) = self.blocks.binary_search_by_key(&start, |b| b.start) else {
            return Release::Unknown;
        };

        let block = &mut self.blocks[index];
        let outcome = if block.is_used {
            Release::Freed {
                length: block.length,
            }
        } else {
            Release::AlreadyFree
        };
        block.is_used = false;

        self.coalesce();
        outcome
    }

    /// Single left-to-right pass merging every free pair into the left block
    fn coalesce(&mut self) {
        let mut i = 0;
        while i + 1 < self.blocks.len() {
            if self.blocks[i].is_free() && self.blocks[i + 1].is_free() {
                let next = self.blocks.remove(i + 1);
                self.blocks[i].length += next.length;
                // Stay on `i`: the grown block may also touch the following one
            } else {
                i += 1;
            }
        }
    }

    pub fn largest_free(&self) -> Size {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.length)
            .max()
            .unwrap_or(0)
    }

    pub fn used_bytes(&self) -> Size {
        self.blocks
            .iter()
            .filter(|b| b.is_used)
            .map(|b| b.length)
            .sum()
    }

    pub fn find(&self, start: Address) -> Option<&MemoryBlock> {
        self.blocks
            .binary_search_by_key(&start, |b| b.start)
            .ok()
            .map(|i| &self.blocks[i])
    }

    /// Blocks tile `[os_size, total_size)` exactly and no two neighbours are free
    pub fn validate(&self) -> MemoryResult<()> {
        let mut expected = self.os_size;
        let mut previous_free = false;

        for block in &self.blocks {
            if block.length == 0 {
                return Err(MemoryError::layout(format!(
                    "empty block at {}",
                    block.start
                )));
            }
            if block.start != expected {
                return Err(MemoryError::layout(format!(
                    "block at {} but previous block ends at {}",
                    block.start, expected
                )));
            }
            if previous_free && block.is_free() {
                return Err(MemoryError::layout(format!(
                    "adjacent free blocks at {}",
                    block.start
                )));
            }
            previous_free = block.is_free();
            expected = block.end();
        }

        if expected != self.total_size {
            return Err(MemoryError::layout(format!(
                "blocks end at {} instead of {}",
                expected, self.total_size
            )));
        }
        Ok(())
    }
}
