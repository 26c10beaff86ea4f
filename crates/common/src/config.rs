//! Startup configuration for the scene.
//!
//! Every field has a default matching the reference scene, so an empty JSON
//! object is a valid configuration.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;
use std::path::{Path, PathBuf};

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("oscillation period must be positive, got {0}")]
    NonPositivePeriod(f32),
    #[error("wing trim must lie in [0, pi/4), got {0}")]
    WingTrimOutOfRange(f32),
    #[error("phase candidate set is empty")]
    EmptyPhaseCandidates,
    #[error("placement volume is empty on axis {0}")]
    EmptyPlacementVolume(char),
}

/// Wing-flap oscillation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlapConfig {
    /// Trim subtracted from pi/4 to get the flap amplitude.
    pub wing_trim: f32,
    /// Duration of one half-cycle (one yoyo leg).
    pub period: f32,
    /// Static root tilt written once when the animator starts.
    pub root_tilt: Vec3,
    /// Candidates for the initial wing phase; one is picked per animator.
    pub phase_candidates: Vec<f32>,
}

impl FlapConfig {
    pub fn amplitude(&self) -> f32 {
        FRAC_PI_4 - self.wing_trim
    }
}

impl Default for FlapConfig {
    fn default() -> Self {
        Self {
            wing_trim: 0.1,
            period: 0.1,
            root_tilt: Vec3::new(
                -std::f32::consts::FRAC_PI_4,
                -std::f32::consts::PI / 16.0,
                -std::f32::consts::FRAC_PI_8,
            ),
            phase_candidates: vec![-FRAC_PI_4],
        }
    }
}

/// Axis-aligned volume instances are scattered in.
///
/// x and y are sampled from `[min, max)`, z from `(min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min: Vec3::new(-10.0, -10.0, -20.0),
            max: Vec3::new(10.0, 10.0, 0.0),
        }
    }
}

/// Idle bobbing applied to the wrapper node of every instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatConfig {
    pub speed: f32,
    pub float_intensity: f32,
    pub rotation_intensity: f32,
    pub floating_range: [f32; 2],
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            float_intensity: 2.0,
            rotation_intensity: 1.0,
            floating_range: [-0.1, 0.1],
        }
    }
}

/// Where the shared model comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub model_path: PathBuf,
    /// Name of the mesh both wings are drawn with.
    pub wing_mesh: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets/butterfly.json"),
            wing_mesh: "wing".into(),
        }
    }
}

/// Top-level scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub instance_count: usize,
    pub placement: PlacementConfig,
    pub flap: FlapConfig,
    pub float: FloatConfig,
    pub asset: AssetConfig,
    /// Seed for reproducible scenes. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            instance_count: 10,
            placement: PlacementConfig::default(),
            flap: FlapConfig::default(),
            float: FloatConfig::default(),
            asset: AssetConfig::default(),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.flap.period > 0.0) {
            return Err(ConfigError::NonPositivePeriod(self.flap.period));
        }
        if !(0.0..FRAC_PI_4).contains(&self.flap.wing_trim) {
            return Err(ConfigError::WingTrimOutOfRange(self.flap.wing_trim));
        }
        if self.flap.phase_candidates.is_empty() {
            return Err(ConfigError::EmptyPhaseCandidates);
        }
        let (min, max) = (self.placement.min, self.placement.max);
        for (axis, lo, hi) in [('x', min.x, max.x), ('y', min.y, max.y), ('z', min.z, max.z)] {
            if !(lo < hi) {
                return Err(ConfigError::EmptyPlacementVolume(axis));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SceneConfig::default();
        config.validate().unwrap();
        assert_eq!(config.instance_count, 10);
        assert_eq!(config.flap.phase_candidates, vec![-FRAC_PI_4]);
        assert!(config.seed.is_none());
    }

    #[test]
    fn amplitude_subtracts_trim() {
        let flap = FlapConfig::default();
        assert!((flap.amplitude() - (FRAC_PI_4 - 0.1)).abs() < 1e-6);
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config: SceneConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn partial_json_overrides() {
        let config: SceneConfig =
            serde_json::from_str(r#"{"instance_count": 3, "seed": 9, "flap": {"period": 0.25}}"#)
                .unwrap();
        assert_eq!(config.instance_count, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.flap.period, 0.25);
        assert_eq!(config.flap.wing_trim, 0.1);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = SceneConfig::default();
        config.flap.period = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::NonPositivePeriod(_))));

        let mut config = SceneConfig::default();
        config.flap.wing_trim = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::WingTrimOutOfRange(_))));

        let mut config = SceneConfig::default();
        config.flap.phase_candidates.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPhaseCandidates)));

        let mut config = SceneConfig::default();
        config.placement.max.z = config.placement.min.z;
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPlacementVolume('z'))));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), r#"{"instance_count": 4}"#).unwrap();
        let config = SceneConfig::load(tmp.path()).unwrap();
        assert_eq!(config.instance_count, 4);
    }

    #[test]
    fn load_rejects_invalid() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), r#"{"flap": {"period": -1.0}}"#).unwrap();
        assert!(SceneConfig::load(tmp.path()).is_err());
    }
}
