/*!
 * Process Types
 * Process control block and lifecycle states
 */

use crate::core::serde::{null_as_default, processor_slot};
use crate::core::types::{Address, Pid, Priority, ProcessorId, Size, Ticks};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Eligible for a processor (also carried by admission-gated backup processes)
    Ready,
    /// Holding a processor this tick
    Running,
    /// Blocked on unfinished predecessors
    Waiting,
    /// Parked by an operator until resumed
    Suspended,
    /// Ran to completion; no longer tracked
    Finished,
}

impl ProcessState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Waiting => "waiting",
            Self::Suspended => "suspended",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process control block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub name: String,
    pub pid: Pid,
    pub required_time: Ticks,
    #[serde(rename = "totalTime")]
    pub total_required_time: Ticks,
    pub priority: Priority,
    pub state: ProcessState,
    pub memory_size: Size,
    pub memory_start: Address,
    #[serde(rename = "processorId", with = "processor_slot")]
    pub processor_id: Option<ProcessorId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub predecessors: BTreeSet<Pid>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub successors: BTreeSet<Pid>,
}

impl Process {
    /// Process not yet admitted; PID, state and processor are set on admission
    pub fn new(name: impl Into<String>, required_time: Ticks, priority: Priority) -> Self {
        Self {
            name: name.into(),
            pid: 0,
            required_time,
            total_required_time: required_time,
            priority,
            state: ProcessState::Ready,
            memory_size: 0,
            memory_start: 0,
            processor_id: None,
            predecessors: BTreeSet::new(),
            successors: BTreeSet::new(),
        }
    }

    /// Attach the block granted by the allocator
    pub fn with_memory(mut self, start: Address, size: Size) -> Self {
        self.memory_start = start;
        self.memory_size = size;
        self
    }

    pub fn with_predecessors(mut self, predecessors: impl IntoIterator<Item = Pid>) -> Self {
        self.predecessors.extend(predecessors);
        self
    }

    #[inline]
    pub fn has_predecessors(&self) -> bool {
        !self.predecessors.is_empty()
    }
}

/// Request payload for creating a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProcess {
    pub name: String,
    pub required_time: Ticks,
    pub priority: Priority,
    pub memory_size: Size,
    #[serde(default, deserialize_with = "null_as_default")]
    pub predecessors: BTreeSet<Pid>,
}

impl NewProcess {
    pub fn new(
        name: impl Into<String>,
        required_time: Ticks,
        priority: Priority,
        memory_size: Size,
    ) -> Self {
        Self {
            name: name.into(),
            required_time,
            priority,
            memory_size,
            predecessors: BTreeSet::new(),
        }
    }

    pub fn after(mut self, predecessors: impl IntoIterator<Item = Pid>) -> Self {
        self.predecessors.extend(predecessors);
        self
    }

    /// Build the PCB once memory has been granted at `memory_start`
    pub fn into_process(self, memory_start: Address) -> Process {
        Process::new(self.name, self.required_time, self.priority)
            .with_memory(memory_start, self.memory_size)
            .with_predecessors(self.predecessors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_matches_clients() {
        let p = Process::new("init", 3, 2).with_memory(256, 64);
        let value = serde_json::to_value(&p).unwrap();

        assert_eq!(value["totalTime"], 3);
        assert_eq!(value["requiredTime"], 3);
        assert_eq!(value["memoryStart"], 256);
        assert_eq!(value["processorId"], -1);
        assert_eq!(value["state"], "ready");
    }

    #[test]
    fn test_new_process_accepts_null_predecessors() {
        let req: NewProcess = serde_json::from_str(
            r#"{"name":"a","requiredTime":2,"priority":1,"memorySize":16,"predecessors":null}"#,
        )
        .unwrap();
        assert!(req.predecessors.is_empty());

        let p = req.into_process(300);
        assert_eq!(p.memory_start, 300);
        assert_eq!(p.total_required_time, 2);
    }

    #[test]
    fn test_predecessors_deduplicate() {
        let p = Process::new("b", 1, 0).with_predecessors([1, 2, 1]);
        assert_eq!(p.predecessors.len(), 2);
    }
}
