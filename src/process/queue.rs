/*!
 * Process Queues
 * The five disjoint sequences a live process can sit in
 */

use super::types::Process;
use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Which queue a process currently occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    Ready,
    Running,
    Waiting,
    Backup,
    Suspended,
}

impl QueueKind {
    /// Queues searched when registering a successor on a predecessor
    pub const SUCCESSOR_LOOKUP: [QueueKind; 4] = [
        QueueKind::Ready,
        QueueKind::Running,
        QueueKind::Waiting,
        QueueKind::Backup,
    ];

    /// A predecessor found in one of these has not finished yet
    #[inline]
    pub const fn blocks_dependents(&self) -> bool {
        matches!(
            self,
            QueueKind::Ready | QueueKind::Running | QueueKind::Waiting
        )
    }
}

/// Ready, Running, Waiting, Backup and Suspended sequences
///
/// Each process is owned by exactly one sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessQueue {
    pub ready: VecDeque<Process>,
    pub running: VecDeque<Process>,
    pub waiting: VecDeque<Process>,
    pub backup: VecDeque<Process>,
    pub suspended: VecDeque<Process>,
}

impl ProcessQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: QueueKind) -> &VecDeque<Process> {
        match kind {
            QueueKind::Ready => &self.ready,
            QueueKind::Running => &self.running,
            QueueKind::Waiting => &self.waiting,
            QueueKind::Backup => &self.backup,
            QueueKind::Suspended => &self.suspended,
        }
    }

    pub fn get_mut(&mut self, kind: QueueKind) -> &mut VecDeque<Process> {
        match kind {
            QueueKind::Ready => &mut self.ready,
            QueueKind::Running => &mut self.running,
            QueueKind::Waiting => &mut self.waiting,
            QueueKind::Backup => &mut self.backup,
            QueueKind::Suspended => &mut self.suspended,
        }
    }

    /// Position of `pid` within the given queue
    pub fn position(&self, kind: QueueKind, pid: Pid) -> Option<usize> {
        self.get(kind).iter().position(|p| p.pid == pid)
    }

    pub fn find_mut(&mut self, kind: QueueKind, pid: Pid) -> Option<&mut Process> {
        self.get_mut(kind).iter_mut().find(|p| p.pid == pid)
    }

    /// Take `pid` out of the given queue, keeping the others' order
    pub fn remove(&mut self, kind: QueueKind, pid: Pid) -> Option<Process> {
        let index = self.position(kind, pid)?;
        self.get_mut(kind).remove(index)
    }

    /// |Ready| + |Running|, the quantity admission control caps
    #[inline]
    pub fn active_len(&self) -> usize {
        self.ready.len() + self.running.len()
    }

    /// Number of live processes across all five queues
    pub fn len(&self) -> usize {
        self.active_len() + self.waiting.len() + self.backup.len() + self.suspended.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stable sort of Ready, highest priority first
    pub fn sort_ready(&mut self) {
        self.ready
            .make_contiguous()
            .sort_by(|a, b| b.priority.cmp(&a.priority));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(pid: Pid, priority: i64) -> Process {
        let mut p = Process::new(format!("p{}", pid), 1, priority);
        p.pid = pid;
        p
    }

    #[test]
    fn test_sort_ready_descending_and_stable() {
        let mut queue = ProcessQueue::new();
        queue.ready.extend([proc(1, 3), proc(2, 5), proc(3, 3), proc(4, 5)]);
        queue.sort_ready();

        let order: Vec<Pid> = queue.ready.iter().map(|p| p.pid).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut queue = ProcessQueue::new();
        queue.waiting.extend([proc(1, 0), proc(2, 0), proc(3, 0)]);

        let removed = queue.remove(QueueKind::Waiting, 2).unwrap();
        assert_eq!(removed.pid, 2);
        let order: Vec<Pid> = queue.waiting.iter().map(|p| p.pid).collect();
        assert_eq!(order, vec![1, 3]);
        assert!(queue.remove(QueueKind::Waiting, 2).is_none());
    }

    #[test]
    fn test_lengths() {
        let mut queue = ProcessQueue::new();
        queue.ready.push_back(proc(1, 0));
        queue.running.push_back(proc(2, 0));
        queue.backup.push_back(proc(3, 0));
        assert_eq!(queue.active_len(), 2);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_serializes_five_named_sequences() {
        let value = serde_json::to_value(ProcessQueue::new()).unwrap();
        for key in ["ready", "running", "waiting", "backup", "suspended"] {
            assert!(value[key].as_array().unwrap().is_empty());
        }
    }
}
