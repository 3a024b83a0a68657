/*!
 * Lock-Free Scheduler Statistics
 * Uses atomic counters so stats can be read without the scheduler lock
 */

use super::types::SchedulerStats;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Atomic scheduler statistics for lock-free updates
///
/// # Note
/// Counters are updated while the scheduler lock is held, but read without
/// it, so a snapshot may straddle a tick.
pub struct AtomicSchedulerStats {
    ticks: AtomicU64,
    total_admitted: AtomicU64,
    total_finished: AtomicU64,
    dispatches: AtomicU64,
    suspensions: AtomicU64,
    resumes: AtomicU64,
    live_processes: AtomicUsize,
}

impl AtomicSchedulerStats {
    #[inline]
    pub fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
            total_admitted: AtomicU64::new(0),
            total_finished: AtomicU64::new(0),
            dispatches: AtomicU64::new(0),
            suspensions: AtomicU64::new(0),
            resumes: AtomicU64::new(0),
            live_processes: AtomicUsize::new(0),
        }
    }

    /// Advance the tick counter, returning the new tick number
    #[inline(always)]
    pub fn inc_ticks(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::Relaxed) + 1
    }

    #[inline(always)]
    pub fn inc_admitted(&self) {
        self.total_admitted.fetch_add(1, Ordering::Relaxed);
        self.live_processes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_finished(&self) {
        self.total_finished.fetch_add(1, Ordering::Relaxed);
        self.live_processes.fetch_sub(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_dispatches(&self) {
        self.dispatches.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_suspensions(&self) {
        self.suspensions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_resumes(&self) {
        self.resumes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn snapshot(&self, processor_count: usize, max_processes: usize) -> SchedulerStats {
        SchedulerStats {
            ticks: self.ticks.load(Ordering::Relaxed),
            total_admitted: self.total_admitted.load(Ordering::Relaxed),
            total_finished: self.total_finished.load(Ordering::Relaxed),
            dispatches: self.dispatches.load(Ordering::Relaxed),
            suspensions: self.suspensions.load(Ordering::Relaxed),
            resumes: self.resumes.load(Ordering::Relaxed),
            live_processes: self.live_processes.load(Ordering::Relaxed),
            processor_count,
            max_processes,
        }
    }
}

impl Default for AtomicSchedulerStats {
    fn default() -> Self {
        Self::new()
    }
}
