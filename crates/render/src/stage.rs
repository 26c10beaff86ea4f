//! Static stage setup around the instances: lights, environment, backdrop, title.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientLight {
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self { intensity: 0.35 }
    }
}

/// Directional cone light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotLight {
    pub position: Vec3,
    /// Cone half-angle in radians.
    pub angle: f32,
    pub penumbra: f32,
    pub shadow_map_size: [u32; 2],
    pub cast_shadow: bool,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(10.0, 10.0, 10.0),
            angle: 0.15,
            penumbra: 1.0,
            shadow_map_size: [512, 512],
            cast_shadow: true,
        }
    }
}

/// HDR light map used for image-based lighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentMap {
    pub path: String,
}

impl Default for EnvironmentMap {
    fn default() -> Self {
        Self {
            path: "forest_slope_1k.hdr".into(),
        }
    }
}

/// Image stretched behind the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backdrop {
    pub image: String,
    pub color: String,
    pub min_width_px: u32,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            image: "flowers.png".into(),
            color: "aliceblue".into(),
            min_width_px: 1920,
        }
    }
}

/// Centered title drawn under the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOverlay {
    pub title: String,
    pub subtitle: String,
    pub color: String,
    pub font: String,
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self {
            title: "ButterFly".into(),
            subtitle: "Designed by deadrabbit".into(),
            color: "#7a9559".into(),
            font: "Leckerli One".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub ambient: AmbientLight,
    pub spot: SpotLight,
    pub environment: EnvironmentMap,
    pub backdrop: Backdrop,
    pub overlay: TextOverlay,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_scene() {
        let stage = StageConfig::default();
        assert_eq!(stage.ambient.intensity, 0.35);
        assert_eq!(stage.spot.position, Vec3::splat(10.0));
        assert_eq!(stage.spot.shadow_map_size, [512, 512]);
        assert_eq!(stage.environment.path, "forest_slope_1k.hdr");
        assert_eq!(stage.overlay.title, "ButterFly");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let stage: StageConfig =
            serde_json::from_str(r#"{"ambient": {"intensity": 0.5}}"#).unwrap();
        assert_eq!(stage.ambient.intensity, 0.5);
        assert_eq!(stage.spot, SpotLight::default());
    }
}
