use std::time::Instant;

/// Monotonic elapsed-time clock, started on creation.
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since the clock started.
    pub fn elapsed_time(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn elapsed_is_monotonic() {
        let clock = Clock::start();
        let a = clock.elapsed_time();
        std::thread::sleep(Duration::from_millis(2));
        let b = clock.elapsed_time();
        assert!(a >= 0.0);
        assert!(b > a);
    }
}
