/*!
 * Dependency Resolution
 * Moves waiting processes on once none of their predecessors is still live
 */

use super::state::SchedulerState;
use crate::core::types::Pid;
use crate::process::{Process, ProcessState, QueueKind};
use tracing::debug;

impl SchedulerState {
    /// Re-evaluate every waiting process after a completion.
    ///
    /// A waiting process is eligible when none of its predecessors is in
    /// Running, Ready or Waiting; finished or never-seen PIDs count as
    /// satisfied. Eligibility is decided for all waiting processes before any
    /// of them moves. Eligible processes go to Ready under the admission cap,
    /// to Backup otherwise; the rest keep their order.
    pub fn release_waiting(&mut self, max_processes: usize) -> Vec<Pid> {
        let eligible: Vec<Pid> = self
            .queue
            .waiting
            .iter()
            .filter(|p| self.dependencies_met(p))
            .map(|p| p.pid)
            .collect();

        if eligible.is_empty() {
            return eligible;
        }

        for &pid in &eligible {
            if let Some(mut process) = self.take(QueueKind::Waiting, pid) {
                process.state = ProcessState::Ready;
                let placed = self.admit(process, max_processes);
                debug!(pid, queue = ?placed, "Dependencies satisfied");
            }
        }
        self.queue.sort_ready();

        eligible
    }

    /// No predecessor of `process` is still in Running, Ready or Waiting
    fn dependencies_met(&self, process: &Process) -> bool {
        process
            .predecessors
            .iter()
            .all(|&pred| !self.is_unfinished(pred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(pid: Pid, priority: i64, predecessors: &[Pid]) -> Process {
        let mut p = Process::new(format!("p{}", pid), 1, priority)
            .with_predecessors(predecessors.iter().copied());
        p.pid = pid;
        p
    }

    #[test]
    fn test_blocked_while_predecessor_live() {
        let mut state = SchedulerState::new();
        state.push_back(QueueKind::Running, proc(1, 0, &[]));
        state.push_back(QueueKind::Waiting, proc(2, 0, &[1]));

        assert!(state.release_waiting(8).is_empty());
        assert_eq!(state.locate(2), Some(QueueKind::Waiting));
    }

    #[test]
    fn test_released_when_predecessor_gone() {
        let mut state = SchedulerState::new();
        state.push_back(QueueKind::Waiting, proc(2, 0, &[1]));
        state.push_back(QueueKind::Waiting, proc(3, 0, &[1, 2]));

        // 3 still waits on 2, which was waiting when eligibility was decided
        assert_eq!(state.release_waiting(8), vec![2]);
        assert_eq!(state.locate(2), Some(QueueKind::Ready));
        assert_eq!(state.locate(3), Some(QueueKind::Waiting));
    }

    #[test]
    fn test_backup_and_suspended_predecessors_do_not_block() {
        let mut state = SchedulerState::new();
        state.push_back(QueueKind::Backup, proc(1, 0, &[]));
        state.push_back(QueueKind::Suspended, proc(2, 0, &[]));
        state.push_back(QueueKind::Waiting, proc(3, 0, &[1, 2]));

        assert_eq!(state.release_waiting(8), vec![3]);
    }

    #[test]
    fn test_released_over_cap_goes_backup() {
        let mut state = SchedulerState::new();
        state.push_back(QueueKind::Ready, proc(1, 0, &[]));
        state.push_back(QueueKind::Waiting, proc(2, 0, &[9]));

        state.release_waiting(1);
        assert_eq!(state.locate(2), Some(QueueKind::Backup));
        assert_eq!(state.queue.backup[0].state, ProcessState::Ready);
    }

    #[test]
    fn test_released_are_sorted_into_ready() {
        let mut state = SchedulerState::new();
        state.push_back(QueueKind::Ready, proc(1, 2, &[]));
        state.push_back(QueueKind::Waiting, proc(2, 7, &[9]));

        state.release_waiting(8);
        let order: Vec<Pid> = state.queue.ready.iter().map(|p| p.pid).collect();
        assert_eq!(order, vec![2, 1]);
    }
}
