/*!
 * Memory Module
 * First-fit contiguous memory allocation
 */

pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::MemoryManager;
pub use traits::*;
pub use types::*;
