/*!
 * Scheduler Statistics & Snapshots
 * Read-only views of the scheduler for reporting and serialization
 */

use super::types::SchedulerStats;
use super::Scheduler;
use crate::core::types::Pid;
use crate::memory::{MemoryManager, MemorySnapshot};
use crate::process::{Process, ProcessQueue, QueueKind};

impl Scheduler {
    /// Get scheduler statistics (lock-free snapshot)
    pub fn stats(&self) -> SchedulerStats {
        self.stats.snapshot(self.processor_count, self.max_processes)
    }

    /// Copy of all five queues
    pub fn queue(&self) -> ProcessQueue {
        self.state.lock().queue.clone()
    }

    /// Queues and `memory`'s blocks read under the queue lock.
    ///
    /// Ticks free memory while holding that lock, so with the attached
    /// allocator a finished process never shows up as a used block.
    pub fn queue_with_memory(&self, memory: &MemoryManager) -> (ProcessQueue, MemorySnapshot) {
        let state = self.state.lock();
        (state.queue.clone(), memory.snapshot())
    }

    /// One slot per processor with the process running on it, if any
    pub fn processor_status(&self) -> Vec<Option<Process>> {
        let state = self.state.lock();
        let mut processors = vec![None; self.processor_count];
        for process in &state.queue.running {
            if let Some(slot) = process.processor_id.and_then(|id| processors.get_mut(id)) {
                *slot = Some(process.clone());
            }
        }
        processors
    }

    /// Copy of a live process
    pub fn process(&self, pid: Pid) -> Option<Process> {
        let state = self.state.lock();
        let kind = state.locate(pid)?;
        state.queue.get(kind).iter().find(|p| p.pid == pid).cloned()
    }

    /// Queue a live process currently sits in
    pub fn location(&self, pid: Pid) -> Option<QueueKind> {
        self.state.lock().locate(pid)
    }

    /// Number of live processes
    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processor_status_slots() {
        let scheduler = Scheduler::new(3, 8);
        scheduler.add_process(Process::new("a", 4, 2));
        scheduler.add_process(Process::new("b", 4, 1));
        scheduler.schedule();

        let slots = scheduler.processor_status();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].as_ref().map(|p| p.pid), Some(1));
        assert_eq!(slots[1].as_ref().map(|p| p.pid), Some(2));
        assert!(slots[2].is_none());
    }

    #[test]
    fn test_status_sees_finished_memory_released() {
        let memory = MemoryManager::new(512, 0).unwrap();
        let scheduler = Scheduler::new(1, 4).with_memory_manager(memory.clone());
        let start = memory.allocate(32).unwrap();
        scheduler.add_process(Process::new("a", 1, 1).with_memory(start, 32));

        let (queue, blocks) = scheduler.queue_with_memory(&memory);
        assert_eq!(queue.ready.len(), 1);
        assert!(blocks.blocks[0].is_used);

        scheduler.schedule();
        scheduler.schedule();
        let (queue, blocks) = scheduler.queue_with_memory(&memory);
        assert!(queue.is_empty());
        assert_eq!(blocks.blocks.len(), 1);
        assert!(blocks.blocks[0].is_free());
    }

    #[test]
    fn test_unknown_pid_lookups() {
        let scheduler = Scheduler::new(1, 1);
        assert!(scheduler.process(5).is_none());
        assert!(scheduler.location(5).is_none());
    }
}
