/// A perpetual yoyo channel: linear from `from` to `from + delta` over one
/// period, back over the next, forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    from: f32,
    delta: f32,
    period: f64,
}

impl Oscillation {
    /// `period` is the duration of one leg and must be positive.
    pub fn new(from: f32, delta: f32, period: f64) -> Self {
        debug_assert!(period > 0.0);
        Self {
            from,
            delta,
            period,
        }
    }

    pub fn start(&self) -> f32 {
        self.from
    }

    /// The far end of the swing.
    pub fn end(&self) -> f32 {
        self.from + self.delta
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Value `elapsed` seconds after the channel started.
    pub fn sample(&self, elapsed: f64) -> f32 {
        self.from + self.delta * self.progress(elapsed)
    }

    /// Position within the current leg in `[0, 1]`, folded for the return leg.
    fn progress(&self, elapsed: f64) -> f32 {
        if elapsed <= 0.0 {
            return 0.0;
        }
        let cycle = elapsed.rem_euclid(2.0 * self.period) / self.period;
        let p = if cycle <= 1.0 { cycle } else { 2.0 - cycle };
        p.clamp(0.0, 1.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn starts_at_from() {
        let osc = Oscillation::new(1.0, -0.5, 0.1);
        assert_eq!(osc.sample(0.0), 1.0);
        assert_eq!(osc.sample(-3.0), 1.0);
    }

    #[test]
    fn reaches_far_end_after_one_leg() {
        let osc = Oscillation::new(1.0, -0.5, 0.1);
        assert_abs_diff_eq!(osc.sample(0.1), 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(osc.end(), 0.5);
    }

    #[test]
    fn returns_after_two_legs() {
        let osc = Oscillation::new(1.0, -0.5, 0.1);
        assert_abs_diff_eq!(osc.sample(0.2), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn linear_within_leg() {
        let osc = Oscillation::new(0.0, 2.0, 1.0);
        assert_abs_diff_eq!(osc.sample(0.25), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(osc.sample(1.5), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(osc.sample(1.75), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn never_leaves_bounds() {
        let osc = Oscillation::new(-0.3, 0.7, 0.13);
        for i in 0..2000 {
            let v = osc.sample(i as f64 * 0.0071);
            assert!((-0.3 - 1e-6..=0.4 + 1e-6).contains(&v), "v = {v}");
        }
    }
}
