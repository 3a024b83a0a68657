/*!
 * Memory Types
 * Common types for memory management
 */

use crate::core::limits::{MEMORY_PRESSURE_CRITICAL, MEMORY_PRESSURE_HIGH, MEMORY_PRESSURE_MEDIUM};
use crate::core::types::{Address, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("No suitable memory block: requested {requested} bytes, largest free block {largest_free} bytes")]
    #[diagnostic(
        code(memory::no_suitable_block),
        help("Free memory is fragmented or exhausted. Wait for running processes to finish.")
    )]
    NoSuitableBlock { requested: Size, largest_free: Size },

    #[error("Zero-sized allocation requested")]
    #[diagnostic(code(memory::zero_size), help("Processes must request at least one byte."))]
    ZeroSize,

    #[error("Invalid memory layout: {reason}")]
    #[diagnostic(
        code(memory::invalid_layout),
        help("Blocks must be address-ordered and tile [os_size, total_size) with no gaps.")
    )]
    InvalidLayout { reason: String },
}

impl MemoryError {
    pub(crate) fn layout(reason: impl Into<String>) -> Self {
        MemoryError::InvalidLayout {
            reason: reason.into(),
        }
    }
}

/// Contiguous region of simulated memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryBlock {
    pub start: Address,
    pub length: Size,
    pub is_used: bool,
}

impl MemoryBlock {
    pub fn free(start: Address, length: Size) -> Self {
        Self {
            start,
            length,
            is_used: false,
        }
    }

    pub fn used(start: Address, length: Size) -> Self {
        Self {
            start,
            length,
            is_used: true,
        }
    }

    /// One past the last address covered by this block
    #[inline]
    pub fn end(&self) -> Address {
        self.start + self.length
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        !self.is_used
    }
}

/// Serializable view of the allocator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot {
    pub total_size: Size,
    pub os_size: Size,
    pub blocks: Vec<MemoryBlock>,
}

/// Memory statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub total_memory: Size,
    pub os_reserved: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub largest_free_block: Size,
    pub used_blocks: usize,
    pub free_blocks: usize,
    /// Percentage of the allocatable region in use
    pub usage_percentage: f64,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        let usage = self.usage_percentage / 100.0;
        if usage >= MEMORY_PRESSURE_CRITICAL {
            MemoryPressure::Critical
        } else if usage >= MEMORY_PRESSURE_HIGH {
            MemoryPressure::High
        } else if usage >= MEMORY_PRESSURE_MEDIUM {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_at(usage_percentage: f64) -> MemoryStats {
        MemoryStats {
            total_memory: 4096,
            os_reserved: 256,
            used_memory: 0,
            available_memory: 0,
            largest_free_block: 0,
            used_blocks: 0,
            free_blocks: 0,
            usage_percentage,
        }
    }

    #[test]
    fn test_pressure_levels() {
        assert_eq!(stats_at(10.0).memory_pressure(), MemoryPressure::Low);
        assert_eq!(stats_at(60.0).memory_pressure(), MemoryPressure::Medium);
        assert_eq!(stats_at(85.0).memory_pressure(), MemoryPressure::High);
        assert_eq!(stats_at(99.0).memory_pressure(), MemoryPressure::Critical);
    }

    #[test]
    fn test_block_wire_names() {
        let json = serde_json::to_string(&MemoryBlock::used(256, 64)).unwrap();
        assert_eq!(json, r#"{"start":256,"length":64,"isUsed":true}"#);
    }
}
