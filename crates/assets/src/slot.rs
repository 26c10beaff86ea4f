use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::task::Poll;

use crate::{AssetLoadError, ModelAsset, ModelLoader};

/// Resolution state of the shared model.
#[derive(Debug, Clone)]
pub enum SlotState {
    Pending,
    Ready(Arc<ModelAsset>),
    Failed(Arc<AssetLoadError>),
}

/// Tracks one in-flight model load across ticks.
#[derive(Debug, Clone)]
pub struct AssetSlot {
    path: PathBuf,
    state: SlotState,
}

impl AssetSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: SlotState::Pending,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    pub fn asset(&self) -> Option<&Arc<ModelAsset>> {
        match &self.state {
            SlotState::Ready(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SlotState::Pending)
    }

    /// Poll the loader if still pending.
    ///
    /// Returns the asset only on the tick it resolves, so callers attach it
    /// exactly once. Failures are logged once and never retried.
    pub fn poll<L: ModelLoader + ?Sized>(&mut self, loader: &mut L) -> Option<Arc<ModelAsset>> {
        if !self.is_pending() {
            return None;
        }
        match loader.poll_load(&self.path) {
            Poll::Pending => None,
            Poll::Ready(Ok(asset)) => {
                tracing::info!(
                    path = %self.path.display(),
                    mesh = %asset.geometry.name,
                    vertices = asset.geometry.vertex_count,
                    "model loaded"
                );
                let asset = Arc::new(asset);
                self.state = SlotState::Ready(Arc::clone(&asset));
                Some(asset)
            }
            Poll::Ready(Err(err)) => {
                tracing::error!(path = %self.path.display(), %err, "model failed to load");
                self.state = SlotState::Failed(Arc::new(err));
                None
            }
        }
    }
}
