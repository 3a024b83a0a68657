/*!
 * Scheduler Core Operations
 * Admission, tick, suspend and resume
 */

use super::types::TickReport;
use super::Scheduler;
use crate::core::errors::SchedulerError;
use crate::core::types::Pid;
use crate::process::{Process, ProcessState, QueueKind};
use tracing::{debug, info};

impl Scheduler {
    /// Admit a process.
    ///
    /// Assigns the next PID and registers the new PID as a successor of every
    /// declared predecessor that is still live in Ready, Running, Waiting or
    /// Backup; unknown predecessors are ignored. A process with predecessors
    /// waits, otherwise it joins Ready (or Backup when Ready + Running is at
    /// the cap). Returns the admitted process as queued.
    pub fn add_process(&self, mut process: Process) -> Process {
        let mut state = self.state.lock();

        let pid = state.allocate_pid();
        process.pid = pid;
        process.processor_id = None;

        for &predecessor in &process.predecessors {
            let registered = match state.locate(predecessor) {
                Some(kind) if QueueKind::SUCCESSOR_LOOKUP.contains(&kind) => state
                    .find_mut(predecessor)
                    .map(|p| p.successors.insert(pid))
                    .is_some(),
                _ => false,
            };
            if !registered {
                debug!(pid, predecessor, "Predecessor not live");
            }
        }

        let placed = if process.has_predecessors() {
            process.state = ProcessState::Waiting;
            state.push_back(QueueKind::Waiting, process.clone());
            QueueKind::Waiting
        } else {
            process.state = ProcessState::Ready;
            let kind = state.admit(process.clone(), self.max_processes);
            state.queue.sort_ready();
            kind
        };

        self.stats.inc_admitted();
        info!(
            pid,
            name = %process.name,
            priority = process.priority,
            required_time = process.required_time,
            queue = ?placed,
            "Process admitted"
        );

        process
    }

    /// Run one tick
    pub fn schedule(&self) -> TickReport {
        let mut state = self.state.lock();
        let mut report = TickReport::new(self.stats.inc_ticks());

        // 1. Age everything that held a processor going into this tick.
        // Processes still waiting their turn here stay in Running, so
        // dependency checks below see them as unfinished.
        let running = state.queue.running.len();
        for _ in 0..running {
            let Some(mut process) = state.pop_front(QueueKind::Running) else {
                break;
            };
            process.priority -= 1;
            process.required_time -= 1;
            process.processor_id = None;

            if process.required_time <= 0 {
                process.state = ProcessState::Finished;
                if process.memory_size > 0 {
                    if let Some(memory) = &self.memory {
                        memory.free(process.memory_start);
                    }
                }
                self.stats.inc_finished();
                info!(
                    pid = process.pid,
                    tick = report.tick,
                    memory_start = process.memory_start,
                    "Process finished"
                );
                report.finished.push(process.pid);

                let released = state.release_waiting(self.max_processes);
                report.released.extend(released);
            } else {
                process.state = ProcessState::Ready;
                state.push_back(QueueKind::Ready, process);
            }
        }

        // 2. Highest priority first
        state.queue.sort_ready();

        // 3. Refill every processor from the head of Ready
        for processor in 0..self.processor_count {
            let Some(mut process) = state.pop_front(QueueKind::Ready) else {
                break;
            };
            process.state = ProcessState::Running;
            process.processor_id = Some(processor);
            debug!(pid = process.pid, processor, "Dispatched");
            report.dispatched.push(process.pid);
            state.push_back(QueueKind::Running, process);
            self.stats.inc_dispatches();
        }

        // 4. Backfill Ready from Backup, FIFO, up to the cap
        while state.queue.active_len() < self.max_processes {
            let Some(process) = state.pop_front(QueueKind::Backup) else {
                break;
            };
            debug!(pid = process.pid, "Admitted from backup");
            report.admitted.push(process.pid);
            state.push_back(QueueKind::Ready, process);
            state.queue.sort_ready();
        }

        debug!(
            tick = report.tick,
            finished = report.finished.len(),
            dispatched = report.dispatched.len(),
            admitted = report.admitted.len(),
            "Tick complete"
        );
        report
    }

    /// Park a Ready or Running process
    pub fn suspend_process(&self, pid: Pid) -> Result<(), SchedulerError> {
        let mut state = self.state.lock();

        let from = match state.locate(pid) {
            Some(kind @ (QueueKind::Ready | QueueKind::Running)) => kind,
            _ => return Err(SchedulerError::ProcessNotFound(pid)),
        };
        let mut process = state
            .take(from, pid)
            .ok_or(SchedulerError::ProcessNotFound(pid))?;

        process.state = ProcessState::Suspended;
        process.processor_id = None;
        state.push_back(QueueKind::Suspended, process);

        self.stats.inc_suspensions();
        info!(pid, from = ?from, "Process suspended");
        Ok(())
    }

    /// Return a suspended process to Ready
    pub fn resume_process(&self, pid: Pid) -> Result<(), SchedulerError> {
        let mut state = self.state.lock();

        let mut process = state
            .take(QueueKind::Suspended, pid)
            .ok_or(SchedulerError::ProcessNotFound(pid))?;

        process.state = ProcessState::Ready;
        state.push_back(QueueKind::Ready, process);
        state.queue.sort_ready();

        self.stats.inc_resumes();
        info!(pid, "Process resumed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryManager;

    #[test]
    fn test_add_without_predecessors_goes_ready() {
        let scheduler = Scheduler::new(2, 4);
        let admitted = scheduler.add_process(Process::new("a", 3, 1));

        assert_eq!(admitted.pid, 1);
        assert_eq!(admitted.state, ProcessState::Ready);
        assert_eq!(admitted.processor_id, None);
        assert_eq!(scheduler.location(1), Some(QueueKind::Ready));
    }

    #[test]
    fn test_add_over_cap_goes_backup() {
        let scheduler = Scheduler::new(1, 1);
        scheduler.add_process(Process::new("a", 3, 1));
        let second = scheduler.add_process(Process::new("b", 3, 1));

        assert_eq!(second.state, ProcessState::Ready);
        assert_eq!(scheduler.location(second.pid), Some(QueueKind::Backup));
    }

    #[test]
    fn test_unknown_predecessor_is_ignored_but_still_waits() {
        let scheduler = Scheduler::new(1, 4);
        let p = scheduler.add_process(Process::new("orphan", 1, 1).with_predecessors([42]));

        assert_eq!(p.state, ProcessState::Waiting);
        assert_eq!(scheduler.location(p.pid), Some(QueueKind::Waiting));
    }

    #[test]
    fn test_successor_registered_on_live_predecessor() {
        let scheduler = Scheduler::new(1, 4);
        scheduler.add_process(Process::new("parent", 2, 1));
        scheduler.add_process(Process::new("child", 1, 1).with_predecessors([1]));

        let parent = scheduler.process(1).unwrap();
        assert!(parent.successors.contains(&2));
    }

    #[test]
    fn test_finished_process_frees_memory() {
        let memory = MemoryManager::new(1024, 128).unwrap();
        let scheduler = Scheduler::new(1, 4).with_memory_manager(memory.clone());

        let start = memory.allocate(100).unwrap();
        scheduler.add_process(Process::new("short", 1, 1).with_memory(start, 100));

        scheduler.schedule();
        assert_eq!(memory.stats().used_memory, 100);

        let report = scheduler.schedule();
        assert_eq!(report.finished, vec![1]);
        assert_eq!(memory.stats().used_memory, 0);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_suspend_running_clears_processor() {
        let scheduler = Scheduler::new(1, 4);
        scheduler.add_process(Process::new("a", 5, 1));
        scheduler.schedule();

        scheduler.suspend_process(1).unwrap();
        let p = scheduler.process(1).unwrap();
        assert_eq!(p.state, ProcessState::Suspended);
        assert_eq!(p.processor_id, None);
    }

    #[test]
    fn test_suspend_waiting_is_not_found() {
        let scheduler = Scheduler::new(1, 4);
        scheduler.add_process(Process::new("a", 5, 1).with_predecessors([9]));

        assert_eq!(
            scheduler.suspend_process(1),
            Err(SchedulerError::ProcessNotFound(1))
        );
        assert_eq!(scheduler.location(1), Some(QueueKind::Waiting));
    }

    #[test]
    fn test_resume_requires_suspended() {
        let scheduler = Scheduler::new(1, 4);
        scheduler.add_process(Process::new("a", 5, 1));
        assert_eq!(
            scheduler.resume_process(1),
            Err(SchedulerError::ProcessNotFound(1))
        );
    }
}
