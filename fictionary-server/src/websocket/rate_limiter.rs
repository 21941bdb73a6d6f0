use std::time::{Duration, Instant};

const DEFAULT_MAX_PER_WINDOW: u32 = 20;
const DEFAULT_WINDOW: Duration = Duration::from_secs(10);

/// Fixed-window throttle on inbound messages, one per connection. A party
/// game produces a handful of actions per player per round; anything past
/// the cap is a misbehaving client.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    window_start: Instant,
    window: Duration,
    max_per_window: u32,
    seen: u32,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_PER_WINDOW, DEFAULT_WINDOW)
    }

    pub fn with_limits(max_per_window: u32, window: Duration) -> Self {
        Self {
            window_start: Instant::now(),
            window,
            max_per_window,
            seen: 0,
        }
    }

    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.window_start) >= self.window {
            self.window_start = now;
            self.seen = 0;
        }

        if self.seen < self.max_per_window {
            self.seen += 1;
            true
        } else {
            false
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
