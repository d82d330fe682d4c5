use std::time::Duration;

/// Trailing-edge debounce over an injected clock.
///
/// Every [`trigger`](Debounce::trigger) restarts the quiet period and replaces the
/// held value; [`poll`](Debounce::poll) releases the last value once the quiet
/// period has elapsed without another trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(Duration, T)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn trigger(&mut self, now: Duration, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    /// Time at which the held value will be released, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match self.pending.take() {
            Some((due, value)) if due <= now => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drop the held value without releasing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_releases_after_quiet_period() {
        let mut debounce = Debounce::new(ms(150));
        debounce.trigger(ms(0), 800.0);
        assert_eq!(debounce.poll(ms(149)), None);
        assert_eq!(debounce.poll(ms(150)), Some(800.0));
        assert_eq!(debounce.poll(ms(500)), None, "released only once");
    }

    #[test]
    fn test_retrigger_restarts_and_keeps_last_value() {
        let mut debounce = Debounce::new(ms(150));
        debounce.trigger(ms(0), 1000.0);
        debounce.trigger(ms(100), 700.0);
        debounce.trigger(ms(200), 500.0);

        assert_eq!(debounce.poll(ms(300)), None);
        assert_eq!(debounce.deadline(), Some(ms(350)));
        assert_eq!(debounce.poll(ms(350)), Some(500.0));
    }

    #[test]
    fn test_cancel_drops_value() {
        let mut debounce = Debounce::new(ms(150));
        debounce.trigger(ms(0), "resize");
        assert_eq!(debounce.cancel(), Some("resize"));
        assert!(!debounce.is_pending());
        assert_eq!(debounce.poll(ms(1000)), None);
    }
}
