use glam::Mat4;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use papillon_common::{AssetId, NodeId, Transform};

/// An event record produced by every mutation to the graph.
///
/// The tick driver and tests drain the log to see
/// exactly which writes happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphEvent {
    /// Node was attached under `parent` (or as a root).
    Attached {
        id: NodeId,
        parent: Option<NodeId>,
        transform: Transform,
    },
    /// Node was removed. Carries the transform it had.
    Detached { id: NodeId, transform: Transform },
    /// Node transform was updated.
    TransformUpdated {
        id: NodeId,
        old: Transform,
        new: Transform,
    },
    /// Node received a mesh binding.
    MeshBound { id: NodeId, asset: AssetId },
}

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
    #[error("parent node {0:?} not found")]
    ParentNotFound(NodeId),
}

/// Geometry drawn at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshBinding {
    pub asset: AssetId,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// A transform node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<MeshBinding>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The authoritative scene graph.
///
/// Animators and the instance pool write through it; the frame composer only
/// reads it. Uses BTreeMap so roots and children come out in allocation order.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<NodeId, Node>,
    next_id: u64,
    event_log: Vec<GraphEvent>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<GraphEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[GraphEvent] {
        &self.event_log
    }

    /// Nodes without a parent, in allocation order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| *id)
    }

    /// Attach a new node under `parent`, or as a root when `parent` is `None`.
    pub fn attach(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        transform: Transform,
    ) -> Result<NodeId, GraphError> {
        if let Some(p) = parent {
            if !self.nodes.contains_key(&p) {
                return Err(GraphError::ParentNotFound(p));
            }
        }
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                name: name.into(),
                transform,
                mesh: None,
                parent,
                children: Vec::new(),
            },
        );
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.push(id);
        }
        self.event_log.push(GraphEvent::Attached {
            id,
            parent,
            transform,
        });
        Ok(id)
    }

    /// Bind a mesh to an existing node.
    pub fn bind_mesh(&mut self, id: NodeId, mesh: MeshBinding) -> Result<(), GraphError> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        node.mesh = Some(mesh);
        self.event_log.push(GraphEvent::MeshBound {
            id,
            asset: mesh.asset,
        });
        Ok(())
    }

    /// Remove a node and its subtree. Returns the removed node if it existed.
    pub fn detach(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        for &child in &node.children {
            self.detach(child);
        }
        self.event_log.push(GraphEvent::Detached {
            id,
            transform: node.transform,
        });
        Some(node)
    }

    /// Replace a node's transform and log the change.
    pub fn set_transform(&mut self, id: NodeId, new: Transform) -> bool {
        self.update_transform(id, |t| *t = new)
    }

    /// Mutate a node's transform in place and log the change.
    pub fn update_transform(&mut self, id: NodeId, f: impl FnOnce(&mut Transform)) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                let old = node.transform;
                f(&mut node.transform);
                let new = node.transform;
                self.event_log
                    .push(GraphEvent::TransformUpdated { id, old, new });
                true
            }
            None => {
                tracing::warn!(node = id.0, "transform write to detached node ignored");
                false
            }
        }
    }

    /// Compose the local transforms from the root down to `id`.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let node = self.nodes.get(&id)?;
        let local = node.transform.to_matrix();
        match node.parent {
            Some(parent) => Some(self.world_matrix(parent)? * local),
            None => Some(local),
        }
    }
}
