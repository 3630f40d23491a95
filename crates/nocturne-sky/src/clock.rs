//! Frame timestamps to clamped delta time.

/// Largest delta (seconds) a single tick may report, including the first
/// tick after the host resumes from a suspend.
pub const MAX_DELTA: f32 = 0.1;

/// Converts successive monotonic frame timestamps into a delta time.
#[derive(Debug, Default, Clone)]
pub struct SimulationClock {
    /// Timestamp of the previous tick in milliseconds.
    last_ms: Option<f64>,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp and return the elapsed seconds since the
    /// previous one, clamped to `0.0..=MAX_DELTA`.
    ///
    /// The first tick (and the first after [`reset`](Self::reset)) returns 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(prev) if now_ms > prev => (((now_ms - prev) / 1000.0) as f32).min(MAX_DELTA),
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta
    }

    /// Forget the previous timestamp.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
