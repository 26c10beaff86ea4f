//! Model assets: the geometry+material pair every instance draws with.
//!
//! Assets are identified by content-addressed hashes. Loading goes through the
//! pollable `ModelLoader` trait so a loader may resolve on a later tick.
//!
//! # Invariants
//! - A resolved `ModelAsset` is immutable and shared via `Arc`.
//! - A failed load is terminal; nothing retries it.

mod loader;
mod slot;

use papillon_common::AssetId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use loader::{DeferredLoader, JsonModelLoader, ModelLoader, StaticLoader, parse_model};
pub use slot::{AssetSlot, SlotState};

/// Mesh data summary of the loaded wing geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub name: String,
    pub vertex_count: u32,
    pub index_count: u32,
}

/// Surface description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".into(),
            base_color: [0.8, 0.8, 0.8, 1.0],
        }
    }
}

/// A loaded geometry+material pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAsset {
    pub id: AssetId,
    pub geometry: Geometry,
    pub material: Material,
}

impl ModelAsset {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        let id = content_hash(&geometry, &material);
        Self {
            id,
            geometry,
            material,
        }
    }
}

/// Errors from model loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("mesh {0:?} not found in model")]
    MissingMesh(String),
    #[error("model has no material")]
    MissingMaterial,
}

fn content_hash(geometry: &Geometry, material: &Material) -> AssetId {
    let mut hasher = Sha256::new();
    hasher.update(geometry.name.as_bytes());
    hasher.update(geometry.vertex_count.to_le_bytes());
    hasher.update(geometry.index_count.to_le_bytes());
    hasher.update(material.name.as_bytes());
    for c in &material.base_color {
        hasher.update(c.to_le_bytes());
    }
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    AssetId(u64::from_le_bytes(bytes))
}
