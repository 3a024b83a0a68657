/*!
 * System Limits and Defaults
 *
 * Centralized location for the simulator's default sizing.
 */

// =============================================================================
// PROCESSOR LIMITS
// =============================================================================

/// Number of simulated processors
pub const DEFAULT_PROCESSOR_COUNT: usize = 2;

/// Admission cap on |Ready| + |Running|
pub const DEFAULT_MAX_PROCESSES: usize = 8;

/// First PID handed out by a fresh scheduler
pub const FIRST_PID: u32 = 1;

// =============================================================================
// MEMORY LIMITS
// =============================================================================

/// Total simulated memory (bytes)
pub const DEFAULT_TOTAL_MEMORY: usize = 4096;

/// Region reserved for the operating system at `[0, DEFAULT_OS_MEMORY)`
pub const DEFAULT_OS_MEMORY: usize = 256;

/// Pressure thresholds, as a fraction of allocatable memory
pub const MEMORY_PRESSURE_MEDIUM: f64 = 0.60;
pub const MEMORY_PRESSURE_HIGH: f64 = 0.80;
pub const MEMORY_PRESSURE_CRITICAL: f64 = 0.95;

// =============================================================================
// NETWORK
// =============================================================================

/// Default listen address for the request server
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Longest request line accepted by the server (bytes)
pub const MAX_REQUEST_LINE: usize = 64 * 1024;
