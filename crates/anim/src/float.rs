use glam::Vec3;
use papillon_common::{FloatConfig, Transform};
use rand::Rng;

/// Idle hover applied to an instance's wrapper node: a slow vertical bob
/// with a small sway, offset per instance so they drift out of step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatMotion {
    config: FloatConfig,
    offset: f64,
}

impl FloatMotion {
    pub fn new(config: FloatConfig, offset: f64) -> Self {
        Self { config, offset }
    }

    /// Offset drawn from `[0, 10000)`.
    pub fn with_rng<R: Rng + ?Sized>(config: FloatConfig, rng: &mut R) -> Self {
        Self::new(config, rng.gen_range(0.0..10_000.0))
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Wrapper-node transform at clock time `t`.
    pub fn sample(&self, t: f64) -> Transform {
        let c = &self.config;
        let s = (self.offset + t) / 4.0 * f64::from(c.speed);
        let (sin, cos) = (s.sin() as f32, s.cos() as f32);

        let [lo, hi] = c.floating_range;
        let y = map_linear(sin / 10.0, -0.1, 0.1, lo, hi) * c.float_intensity;

        Transform {
            position: Vec3::new(0.0, y, 0.0),
            rotation: Vec3::new(cos / 8.0, sin / 8.0, sin / 20.0) * c.rotation_intensity,
            scale: Vec3::ONE,
        }
    }
}

fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}
