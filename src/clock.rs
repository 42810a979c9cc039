//! Frame clock: turns host animation timestamps into clamped simulation steps.

/// Default ceiling on a single step, in seconds. A hidden tab can stall
/// `requestAnimationFrame` for a long time; the step never exceeds this.
pub const DEFAULT_MAX_DT: f64 = 0.1;

/// FrameClock tracks the previous animation timestamp (ms) and yields the
/// elapsed seconds between ticks.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f64,
}

impl FrameClock {
    pub fn new(max_dt: f64) -> Self {
        Self { last_ms: None, max_dt }
    }

    /// Elapsed seconds since the previous tick, clamped to `[0, max_dt]`.
    /// The first tick only records the timestamp and returns `0.0`.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => (now_ms - last) / 1000.0,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, self.max_dt)
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DT)
    }
}
