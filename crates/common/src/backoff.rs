// Poll delay backoff
//
// The tray polls the CLI on a timer that doubles while nothing happens,
// trading freshness against polling overhead once the connection settles.
// Any user action resets the delay to its floor.

use std::time::Duration;

/// Doubling poll delay with a floor and a ceiling
#[derive(Debug, Clone)]
pub struct PollBackoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl PollBackoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            current: initial,
        }
    }

    /// Delay to use for the next timer arming.
    ///
    /// Returns the current delay and doubles the stored value for the
    /// arming after that, capped at the ceiling.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    /// Return the delay to its floor (on startup and on user actions)
    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}
