use std::path::Path;
use std::task::Poll;

use serde_json::Value;

use crate::{AssetLoadError, Geometry, Material, ModelAsset};

/// Source of the shared model asset.
///
/// `poll_load` may return `Pending` any number of times before resolving;
/// callers poll once per tick.
pub trait ModelLoader {
    fn poll_load(&mut self, path: &Path) -> Poll<Result<ModelAsset, AssetLoadError>>;
}

/// Reads a glTF-style JSON model from disk.
///
/// Uses the mesh named `wing_mesh` and the material its first primitive
/// references, falling back to the first material in the document.
#[derive(Debug, Clone)]
pub struct JsonModelLoader {
    wing_mesh: String,
}

impl JsonModelLoader {
    pub fn new(wing_mesh: impl Into<String>) -> Self {
        Self {
            wing_mesh: wing_mesh.into(),
        }
    }
}

impl ModelLoader for JsonModelLoader {
    fn poll_load(&mut self, path: &Path) -> Poll<Result<ModelAsset, AssetLoadError>> {
        let load = || -> Result<ModelAsset, AssetLoadError> {
            let data = std::fs::read_to_string(path)?;
            let json: Value = serde_json::from_str(&data)?;
            parse_model(&json, &self.wing_mesh)
        };
        Poll::Ready(load())
    }
}

/// Extract the wing geometry and its material from a glTF-style document.
pub fn parse_model(json: &Value, wing_mesh: &str) -> Result<ModelAsset, AssetLoadError> {
    let mesh = json
        .get("meshes")
        .and_then(|m| m.as_array())
        .and_then(|meshes| {
            meshes
                .iter()
                .find(|m| m.get("name").and_then(|n| n.as_str()) == Some(wing_mesh))
        })
        .ok_or_else(|| AssetLoadError::MissingMesh(wing_mesh.to_string()))?;

    let primitive = mesh
        .get("primitives")
        .and_then(|p| p.as_array())
        .and_then(|p| p.first());
    let accessor_count = |index: Option<&Value>| {
        index
            .and_then(|i| i.as_u64())
            .and_then(|i| json.get("accessors")?.get(i as usize)?.get("count")?.as_u64())
            .unwrap_or(0) as u32
    };
    let geometry = Geometry {
        name: wing_mesh.to_string(),
        vertex_count: accessor_count(
            primitive
                .and_then(|p| p.get("attributes"))
                .and_then(|a| a.get("POSITION")),
        ),
        index_count: accessor_count(primitive.and_then(|p| p.get("indices"))),
    };

    let materials = json.get("materials").and_then(|m| m.as_array());
    let material_val = primitive
        .and_then(|p| p.get("material"))
        .and_then(|i| i.as_u64())
        .and_then(|i| materials?.get(i as usize))
        .or_else(|| materials?.first())
        .ok_or(AssetLoadError::MissingMaterial)?;

    let name = material_val
        .get("name")
        .and_then(|n| n.as_str())
        .unwrap_or("unnamed")
        .to_string();
    let base_color = material_val
        .get("pbrMetallicRoughness")
        .and_then(|pbr| pbr.get("baseColorFactor"))
        .and_then(|c| c.as_array())
        .map(|arr| {
            let mut color = [0.8f32, 0.8, 0.8, 1.0];
            for (i, v) in arr.iter().enumerate().take(4) {
                if let Some(f) = v.as_f64() {
                    color[i] = f as f32;
                }
            }
            color
        })
        .unwrap_or(Material::default().base_color);

    Ok(ModelAsset::new(geometry, Material { name, base_color }))
}

/// Stays pending for a number of polls, then delegates.
///
/// Stands in for a network fetch when running headless.
#[derive(Debug, Clone)]
pub struct DeferredLoader<L> {
    inner: L,
    remaining: u32,
}

impl<L: ModelLoader> DeferredLoader<L> {
    pub fn new(inner: L, polls: u32) -> Self {
        Self {
            inner,
            remaining: polls,
        }
    }
}

impl<L: ModelLoader> ModelLoader for DeferredLoader<L> {
    fn poll_load(&mut self, path: &Path) -> Poll<Result<ModelAsset, AssetLoadError>> {
        if self.remaining > 0 {
            self.remaining -= 1;
            return Poll::Pending;
        }
        self.inner.poll_load(path)
    }
}

/// Resolves immediately to a fixed asset, whatever the path.
#[derive(Debug, Clone)]
pub struct StaticLoader(pub ModelAsset);

impl ModelLoader for StaticLoader {
    fn poll_load(&mut self, _path: &Path) -> Poll<Result<ModelAsset, AssetLoadError>> {
        Poll::Ready(Ok(self.0.clone()))
    }
}
