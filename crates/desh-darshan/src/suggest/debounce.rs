use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Single-slot cancellable scheduled task.
///
/// At most one value is pending. Scheduling again replaces it and restarts
/// the quiet period, so only the last value of a burst is ever delivered.
/// Time is passed in explicitly; nothing runs in the background.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Schedule `value` for `now + quiet`. Returns `true` when an earlier
    /// pending value was superseded.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        let superseded = self.pending.is_some();
        self.pending = Some(Pending {
            value,
            deadline: now + self.quiet,
        });
        superseded
    }

    /// Drop the pending value, if any. Returns whether something was dropped.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Take the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    fn test_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        assert!(!debouncer.schedule("taj", start));

        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(start + QUIET), Some("taj"));
        assert_eq!(debouncer.poll(start + QUIET * 2), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_later_schedule_supersedes() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.schedule("t", start);
        assert!(debouncer.schedule("ta", start + Duration::from_millis(200)));

        // The first deadline has passed but the restarted one has not.
        assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some("ta")
        );
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        assert!(!debouncer.cancel());
        debouncer.schedule(1, start);
        assert_eq!(debouncer.deadline(), Some(start + QUIET));
        assert!(debouncer.cancel());
        assert_eq!(debouncer.poll(start + QUIET), None);
        assert_eq!(debouncer.deadline(), None);
    }
}
