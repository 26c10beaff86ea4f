//! Scene population: model instances scattered through a bounded volume.
//!
//! # Invariants
//! - Pool membership is fixed once populated.
//! - Each instance's nodes are written only by its own animator and float motion.
//! - Teardown cancels an instance's animation before its nodes leave the graph.

mod instance;
mod placement;
mod pool;

pub use instance::{ModelInstance, WingSide};
pub use placement::PlacementVolume;
pub use pool::{InstancePool, PoolStatus, scene_rng};

use papillon_anim::AnimError;
use papillon_common::ConfigError;
use papillon_kernel::GraphError;

/// Errors from building or mutating the scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("animation error: {0}")]
    Anim(#[from] AnimError),
    #[error("instance was torn down")]
    TornDown,
}
