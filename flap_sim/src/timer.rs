use std::time::Duration;

/// Fixed-period timer over simulated time.  Firings are never dropped: a
/// long step reports every period it crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnTimer {
    elapsed:  Duration,
    interval: Duration,
}

impl SpawnTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated toward the next firing.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Advance by `dt` and return how many times the timer fired.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.elapsed = self.elapsed.saturating_add(dt);
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}
