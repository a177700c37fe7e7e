//! Deferred simulation tasks
//!
//! Delayed work (arrow clean-up, target replacement, staggered spawns, level
//! advance) is queued here and drained at the start of each tick. Tasks name
//! entities by ID; a task whose entity is already gone does nothing.

/// Work to run once its due time is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Drop a resting arrow
    RemoveArrow(u32),
    /// Drop a hit target, replacing it if the level still needs hits
    RemoveTarget(u32),
    /// Add one target for the current mode
    SpawnTarget,
    /// Start the (already advanced) level
    ReinitializeLevel,
}

/// A queued task
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTask {
    /// Simulation time the task becomes due (ms)
    pub due_ms: f64,
    /// Level epoch the task was queued in
    pub epoch: u32,
    pub task: Deferred,
    seq: u64,
}

/// Time-ordered task queue
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: f64, epoch: u32, task: Deferred) {
        self.tasks.push(ScheduledTask {
            due_ms,
            epoch,
            task,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Remove and return every task due at `now_ms`
    ///
    /// Ordered by due time, ties in the order they were scheduled.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<ScheduledTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.due_ms <= now_ms);
        self.tasks = pending;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due
    }

    /// Drop everything still pending
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pending tasks in queue order
    pub fn pending(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_due_early() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(100.0, 0, Deferred::SpawnTarget);
        assert!(scheduler.take_due(99.0).is_empty());
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn due_tasks_in_time_then_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(200.0, 0, Deferred::RemoveArrow(1));
        scheduler.schedule(100.0, 0, Deferred::RemoveTarget(2));
        scheduler.schedule(100.0, 0, Deferred::SpawnTarget);
        scheduler.schedule(500.0, 0, Deferred::ReinitializeLevel);

        let due: Vec<_> = scheduler.take_due(200.0).into_iter().map(|t| t.task).collect();
        assert_eq!(
            due,
            vec![
                Deferred::RemoveTarget(2),
                Deferred::SpawnTarget,
                Deferred::RemoveArrow(1)
            ]
        );
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.pending().next().unwrap().task, Deferred::ReinitializeLevel);
    }

    #[test]
    fn clear_drops_pending() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10.0, 3, Deferred::SpawnTarget);
        scheduler.clear();
        assert!(scheduler.is_empty());
        assert!(scheduler.take_due(1000.0).is_empty());
    }

    #[test]
    fn epoch_is_kept() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.0, 7, Deferred::SpawnTarget);
        assert_eq!(scheduler.take_due(0.0)[0].epoch, 7);
    }
}
