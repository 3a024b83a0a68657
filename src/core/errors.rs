/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export MemoryError from memory module
pub use crate::memory::MemoryError;

use crate::core::types::Pid;

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Process {0} not found")]
    #[diagnostic(
        code(scheduler::process_not_found),
        help("Suspend only applies to ready or running processes, resume only to suspended ones.")
    )]
    ProcessNotFound(Pid),
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum KernelError {
    #[error("Memory error: {0}")]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(kernel::configuration_error),
        help("Invalid configuration. Review the SIM_* environment variables.")
    )]
    Configuration(String),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(kernel::io_error),
        help("Network or socket operation failed. Check the listen address.")
    )]
    Io(String),

    #[error("Invalid request: {0}")]
    #[diagnostic(
        code(kernel::invalid_request),
        help("Requests are single-line JSON objects tagged with an `op` field.")
    )]
    InvalidRequest(String),
}

impl From<std::io::Error> for KernelError {
    fn from(err: std::io::Error) -> Self {
        KernelError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KernelError {
    fn from(err: serde_json::Error) -> Self {
        KernelError::InvalidRequest(err.to_string())
    }
}

/// Serializable error representation for API responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SerializableError {
    pub error_type: String,
    pub message: String,
}

impl SerializableError {
    /// Create a new serializable error
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }
}

impl From<SchedulerError> for SerializableError {
    fn from(err: SchedulerError) -> Self {
        SerializableError::new("scheduler_error", err.to_string())
    }
}

impl From<MemoryError> for SerializableError {
    fn from(err: MemoryError) -> Self {
        SerializableError::new("memory_error", err.to_string())
    }
}

impl From<KernelError> for SerializableError {
    fn from(err: KernelError) -> Self {
        let error_type = match &err {
            KernelError::Memory(_) => "memory_error",
            KernelError::Scheduler(_) => "scheduler_error",
            KernelError::Configuration(_) => "configuration_error",
            KernelError::Io(_) => "io_error",
            KernelError::InvalidRequest(_) => "invalid_request",
        };
        SerializableError::new(error_type, err.to_string())
    }
}

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, KernelError>;
