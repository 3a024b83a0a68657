/*!
 * Scheduler State
 * Queues plus a pid -> queue index, mutated only under the scheduler lock
 */

use crate::core::limits::FIRST_PID;
use crate::core::types::Pid;
use crate::process::{Process, ProcessQueue, ProcessState, QueueKind};
use ahash::RandomState;
use std::collections::HashMap;

pub(super) struct SchedulerState {
    pub queue: ProcessQueue,
    // Process location index for O(1) lookup
    locations: HashMap<Pid, QueueKind, RandomState>,
    next_pid: Pid,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self {
            queue: ProcessQueue::new(),
            locations: HashMap::with_hasher(RandomState::new()),
            next_pid: FIRST_PID,
        }
    }

    pub fn allocate_pid(&mut self) -> Pid {
        let pid = self.next_pid;
        self.next_pid += 1;
        pid
    }

    #[inline]
    pub fn locate(&self, pid: Pid) -> Option<QueueKind> {
        self.locations.get(&pid).copied()
    }

    /// True while `pid` sits in Ready, Running or Waiting
    #[inline]
    pub fn is_unfinished(&self, pid: Pid) -> bool {
        self.locate(pid)
            .is_some_and(|kind| kind.blocks_dependents())
    }

    pub fn push_back(&mut self, kind: QueueKind, process: Process) {
        self.locations.insert(process.pid, kind);
        self.queue.get_mut(kind).push_back(process);
    }

    pub fn pop_front(&mut self, kind: QueueKind) -> Option<Process> {
        let process = self.queue.get_mut(kind).pop_front()?;
        self.locations.remove(&process.pid);
        Some(process)
    }

    /// Remove `pid` if, and only if, it currently sits in `kind`
    pub fn take(&mut self, kind: QueueKind, pid: Pid) -> Option<Process> {
        if self.locate(pid) != Some(kind) {
            return None;
        }
        let process = self.queue.remove(kind, pid)?;
        self.locations.remove(&pid);
        Some(process)
    }

    pub fn find_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        let kind = self.locate(pid)?;
        self.queue.find_mut(kind, pid)
    }

    /// Ready when |Ready| + |Running| is under the cap, Backup otherwise.
    ///
    /// The process is labelled `Ready` either way; callers re-sort Ready.
    pub fn admit(&mut self, mut process: Process, max_processes: usize) -> QueueKind {
        process.state = ProcessState::Ready;
        process.processor_id = None;
        let kind = if self.queue.active_len() < max_processes {
            QueueKind::Ready
        } else {
            QueueKind::Backup
        };
        self.push_back(kind, process);
        kind
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }
}
