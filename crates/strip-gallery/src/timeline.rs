use std::time::Duration;

/// Identifies one scheduled task so it can be cancelled before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, PartialEq)]
struct Entry<T> {
    due: Duration,
    handle: TimerHandle,
    task: T,
}

/// A cooperative, single-threaded timer queue driven by an injected clock.
///
/// Nothing runs on its own: the owner calls [`Timeline::pop_due`] with the current
/// time and executes whatever comes back. Tasks due at the same instant come back
/// in the order they were scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Schedule `task` to become due at the absolute time `due`.
    pub fn schedule(&mut self, due: Duration, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { due, handle, task });
        handle
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Earliest due time among pending tasks.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, TimerHandle, T)> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.handle.0))
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(pos);
        Some((entry.due, entry.handle, entry.task))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_pops_in_due_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(300), "late");
        timeline.schedule(ms(50), "early");
        timeline.schedule(ms(200), "middle");

        assert_eq!(timeline.pop_due(ms(1000)).map(|t| t.2), Some("early"));
        assert_eq!(timeline.pop_due(ms(1000)).map(|t| t.2), Some("middle"));
        assert_eq!(timeline.pop_due(ms(1000)).map(|t| t.2), Some("late"));
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_nothing_due_before_deadline() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(600), ());
        assert!(timeline.pop_due(ms(599)).is_none());
        assert_eq!(timeline.next_deadline(), Some(ms(600)));
        assert!(timeline.pop_due(ms(600)).is_some());
    }

    #[test]
    fn test_ties_run_in_schedule_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(ms(100), 1);
        timeline.schedule(ms(100), 2);
        timeline.schedule(ms(100), 3);
        let order: Vec<i32> = std::iter::from_fn(|| timeline.pop_due(ms(100)).map(|t| t.2)).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_cancelled_task_never_runs() {
        let mut timeline = Timeline::new();
        let first = timeline.schedule(ms(10), "first");
        let second = timeline.schedule(ms(20), "second");

        assert!(timeline.cancel(first));
        assert!(!timeline.cancel(first), "double cancel reports false");
        assert!(!timeline.is_pending(first));
        assert!(timeline.is_pending(second));

        assert_eq!(timeline.pop_due(ms(100)).map(|t| t.2), Some("second"));
        assert!(timeline.pop_due(ms(100)).is_none());
    }
}
