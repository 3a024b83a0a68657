/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (assigned by the scheduler, starting at 1)
pub type Pid = u32;

/// Address type for simulated memory
pub type Address = usize;

/// Size type for simulated memory
pub type Size = usize;

/// Priority level (higher is more important, decays below zero while running)
pub type Priority = i64;

/// Remaining execution time in ticks
pub type Ticks = i64;

/// Processor index in `[0, processor_count)`
pub type ProcessorId = usize;

/// Common result type for simulator operations
pub type KernelResult<T> = Result<T, super::errors::KernelError>;
