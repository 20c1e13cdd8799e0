use std::time::{Duration, Instant};

/// Start/stop accumulator for wall-clock play time.
///
/// Starting a running stopwatch or stopping a stopped one is a no-op, so
/// duration only ever grows across suspend/resume boundaries.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Stopwatch { started_at: None }
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Stops the stopwatch and returns the time since the matching `start`.
    pub fn stop(&mut self) -> Duration {
        self.started_at
            .take()
            .map(|started| started.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Time on the current run, without stopping.
    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|started| started.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Banks the current run and keeps going.
    pub fn lap(&mut self) -> Duration {
        let elapsed = self.stop();
        self.start();
        elapsed
    }
}

/// Whole milliseconds in `duration`, the unit play time is persisted in.
pub fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_millis_keeps_sub_second_time() {
        assert_eq!(whole_millis(Duration::from_micros(1_999_900)), 1_999);
        assert_eq!(whole_millis(Duration::from_millis(450)), 450);
    }

    #[test]
    fn test_stop_without_start_is_zero() {
        let mut stopwatch = Stopwatch::new();
        assert_eq!(stopwatch.stop(), Duration::ZERO);
        assert!(!stopwatch.is_running());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        std::thread::sleep(Duration::from_millis(5));
        stopwatch.start();
        assert!(stopwatch.stop() >= Duration::from_millis(5));
    }

    #[test]
    fn test_second_stop_returns_zero() {
        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        stopwatch.stop();
        assert_eq!(stopwatch.stop(), Duration::ZERO);
    }

    #[test]
    fn test_lap_keeps_running() {
        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        stopwatch.lap();
        assert!(stopwatch.is_running());
    }
}
