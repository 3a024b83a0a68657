/*!
 * API Types
 * Request and response shapes for the request layer
 */

use crate::core::types::Pid;
use crate::memory::{MemorySnapshot, MemoryStats};
use crate::process::{NewProcess, Process, ProcessQueue};
use crate::scheduler::{SchedulerStats, TickReport};
use serde::{Deserialize, Serialize};

/// Status code for a successful request
pub const CODE_OK: u16 = 0;
/// Status code for a rejected request
pub const CODE_BAD_REQUEST: u16 = 400;
/// Status code when a reply could not be built
pub const CODE_INTERNAL_ERROR: u16 = 500;

/// Response envelope: `code` 0 on success, non-zero on error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            code: CODE_OK,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            code: CODE_OK,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}

/// Queues plus memory, as returned by a status request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub queue: ProcessQueue,
    pub memory: MemorySnapshot,
}

/// Outcome of one tick plus the queues afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub report: TickReport,
    pub queue: ProcessQueue,
}

/// Running process per processor, `null` for idle processors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorStatusResponse {
    pub processors: Vec<Option<Process>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub scheduler: SchedulerStats,
    pub memory: MemoryStats,
    pub pressure: crate::memory::MemoryPressure,
}

/// One request line, tagged by `op`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    AddProcess {
        #[serde(flatten)]
        process: NewProcess,
    },
    Status,
    Schedule,
    Suspend {
        pid: Pid,
    },
    Resume {
        pid: Pid,
    },
    ProcessorStatus,
    Stats,
    Reset,
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::AddProcess { .. } => "add_process",
            Request::Status => "status",
            Request::Schedule => "schedule",
            Request::Suspend { .. } => "suspend",
            Request::Resume { .. } => "resume",
            Request::ProcessorStatus => "processor_status",
            Request::Stats => "stats",
            Request::Reset => "reset",
        }
    }
}
