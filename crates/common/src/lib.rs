//! Shared types for the papillon workspace: ids, transforms, scene configuration.
//!
//! # Invariants
//! - Rotations are Euler angles in radians, applied in XYZ order.
//! - Configuration defaults reproduce the reference butterfly scene.

pub mod config;
pub mod types;

pub use config::{AssetConfig, ConfigError, FlapConfig, FloatConfig, PlacementConfig, SceneConfig};
pub use types::{AssetId, InstanceId, NodeId, Transform};
