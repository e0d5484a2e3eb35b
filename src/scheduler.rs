use std::time::{Duration, Instant};

/// Fixed-period tick source polled from the main loop.
///
/// Holds a single deadline, so arming it again replaces the previous schedule
/// instead of stacking a second one.
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Ticker { period, next_due: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn restart(&mut self, now: Instant) {
        self.stop();
        self.start(now);
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Returns true at most once per period. A loop that fell several periods
    /// behind gets one tick, not a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.next_due {
            Some(due) if due <= now => due,
            _ => return false,
        };

        let mut next = due + self.period;
        if next <= now {
            next = now + self.period;
        }
        self.next_due = Some(next);
        true
    }
}

#[cfg(test)]
impl Ticker {
    pub(crate) fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(150);

    #[test]
    fn test_idle_until_started() {
        let now = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        assert!(!ticker.is_armed());
        assert!(!ticker.poll(now + PERIOD * 10));
    }

    #[test]
    fn test_ticks_once_per_period() {
        let now = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.start(now);

        assert!(!ticker.poll(now + Duration::from_millis(100)));
        assert!(ticker.poll(now + PERIOD));
        assert!(!ticker.poll(now + PERIOD));
        assert!(ticker.poll(now + PERIOD * 2));
    }

    #[test]
    fn test_no_burst_after_stall() {
        let now = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.start(now);

        let late = now + PERIOD * 5;
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert_eq!(ticker.time_until_due(late), Some(PERIOD));
    }

    #[test]
    fn test_stop() {
        let now = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.start(now);
        ticker.stop();
        assert!(!ticker.is_armed());
        assert!(!ticker.poll(now + PERIOD));
        assert_eq!(ticker.time_until_due(now), None);
    }

    #[test]
    fn test_repeated_restarts_keep_one_schedule() {
        let now = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        for i in 0..5 {
            ticker.restart(now + Duration::from_millis(10 * i));
        }

        let last = now + Duration::from_millis(40);
        assert!(!ticker.poll(last + PERIOD - Duration::from_millis(1)));
        assert!(ticker.poll(last + PERIOD));
        assert!(!ticker.poll(last + PERIOD + Duration::from_millis(1)));
    }
}
