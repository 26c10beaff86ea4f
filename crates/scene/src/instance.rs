use std::sync::Arc;

use glam::Vec3;
use papillon_anim::{AnimatorStatus, FloatMotion, WingFlapAnimator, WingRig};
use papillon_assets::ModelAsset;
use papillon_common::{InstanceId, NodeId, SceneConfig, Transform};
use papillon_kernel::{MeshBinding, SceneGraph};
use rand::Rng;

use crate::SceneError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WingSide {
    Left,
    Right,
}

impl WingSide {
    fn node_name(self) -> &'static str {
        match self {
            Self::Left => "wing.left",
            Self::Right => "wing.right",
        }
    }
}

/// One positioned copy of the shared model.
///
/// Node layout: `float` (idle hover) → `butterfly` (placed root, static tilt)
/// → `wing.left` / `wing.right` (both bound to the shared wing geometry).
/// The wrapper and root exist from spawn; the wings attach once the asset
/// resolves, which is what lets the animator start.
#[derive(Debug)]
pub struct ModelInstance {
    id: InstanceId,
    position: Vec3,
    float_node: NodeId,
    rig: WingRig,
    asset: Option<Arc<ModelAsset>>,
    animator: WingFlapAnimator,
    float: FloatMotion,
    torn_down: bool,
}

impl ModelInstance {
    pub fn spawn<R: Rng + ?Sized>(
        graph: &mut SceneGraph,
        position: Vec3,
        config: &SceneConfig,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        let animator = WingFlapAnimator::from_config(&config.flap, rng)?;
        let float = FloatMotion::with_rng(config.float, rng);

        let float_node = graph.attach(None, "float", Transform::default())?;
        let root = graph.attach(Some(float_node), "butterfly", Transform::from_position(position))?;

        let id = InstanceId::new();
        tracing::debug!(
            instance = %id.short(),
            x = position.x,
            y = position.y,
            z = position.z,
            "instance spawned"
        );
        Ok(Self {
            id,
            position,
            float_node,
            rig: WingRig {
                root: Some(root),
                ..WingRig::default()
            },
            asset: None,
            animator,
            float,
            torn_down: false,
        })
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn float_node(&self) -> NodeId {
        self.float_node
    }

    pub fn rig(&self) -> &WingRig {
        &self.rig
    }

    pub fn asset(&self) -> Option<&Arc<ModelAsset>> {
        self.asset.as_ref()
    }

    pub fn animator(&self) -> &WingFlapAnimator {
        &self.animator
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Attach one wing node bound to the shared geometry.
    ///
    /// Returns the existing node if that wing is already attached.
    pub fn attach_wing(
        &mut self,
        graph: &mut SceneGraph,
        side: WingSide,
        asset: &Arc<ModelAsset>,
    ) -> Result<NodeId, SceneError> {
        if self.torn_down {
            return Err(SceneError::TornDown);
        }
        let slot = match side {
            WingSide::Left => &mut self.rig.left_wing,
            WingSide::Right => &mut self.rig.right_wing,
        };
        if let Some(id) = *slot {
            return Ok(id);
        }
        let root = self.rig.root.ok_or(SceneError::TornDown)?;
        let id = graph.attach(Some(root), side.node_name(), Transform::default())?;
        graph.bind_mesh(
            id,
            MeshBinding {
                asset: asset.id,
                cast_shadow: true,
                receive_shadow: true,
            },
        )?;
        *slot = Some(id);
        self.asset = Some(Arc::clone(asset));
        Ok(id)
    }

    /// Attach both wings.
    pub fn attach_asset(&mut self, graph: &mut SceneGraph, asset: &Arc<ModelAsset>) -> Result<(), SceneError> {
        self.attach_wing(graph, WingSide::Left, asset)?;
        self.attach_wing(graph, WingSide::Right, asset)?;
        Ok(())
    }

    /// Advance float motion and the wing animator to clock time `now`.
    ///
    /// Writes are logged on `graph`; the caller drains them.
    pub fn update(&mut self, graph: &mut SceneGraph, now: f64) -> AnimatorStatus {
        if self.torn_down {
            return AnimatorStatus::Stopped;
        }
        graph.set_transform(self.float_node, self.float.sample(now));
        self.animator.tick(graph, &self.rig, now)
    }

    /// Cancel the animator, then remove the instance's nodes.
    ///
    /// Idempotent. Returns `true` the first time.
    pub fn teardown(&mut self, graph: &mut SceneGraph) -> bool {
        if self.torn_down {
            return false;
        }
        self.animator.teardown();
        graph.detach(self.float_node);
        self.rig = WingRig::default();
        self.torn_down = true;
        tracing::debug!(instance = %self.id.short(), "instance torn down");
        true
    }
}
