use glam::Vec3;
use papillon_common::PlacementConfig;
use rand::Rng;

/// Volume instance positions are drawn from.
///
/// x and y are uniform in `[min, max)`; z is uniform in `(min, max]` so the
/// far plane is never hit and the near plane (z = 0 by default) can be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl From<PlacementConfig> for PlacementVolume {
    fn from(config: PlacementConfig) -> Self {
        Self {
            min: config.min,
            max: config.max,
        }
    }
}

impl PlacementVolume {
    /// One independent position. Overlap with earlier samples is not checked.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let p = Vec3::new(
            rng.gen_range(self.min.x..self.max.x),
            rng.gen_range(self.min.y..self.max.y),
            self.max.z - rng.gen_range(0.0..self.max.z - self.min.z),
        );
        debug_assert!(self.contains(p), "sample {p} outside placement volume");
        p
    }

    pub fn contains(&self, p: Vec3) -> bool {
        (self.min.x..self.max.x).contains(&p.x)
            && (self.min.y..self.max.y).contains(&p.y)
            && p.z > self.min.z
            && p.z <= self.max.z
    }
}
