/// Elapsed-time source shared by every animator in a scene.
///
/// Advanced once per render tick; all channels read the same `elapsed()`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    elapsed: f64,
    ticks: u64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the clock started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of `advance` calls so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance by `dt` seconds. Negative or non-finite steps count as zero.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.ticks += 1;
        self.elapsed
    }
}
