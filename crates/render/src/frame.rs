use glam::{Mat4, Vec3};
use papillon_common::{NodeId, Transform};
use papillon_kernel::{MeshBinding, SceneGraph};

use crate::{RenderView, StageConfig};

/// One node of a composed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameNode {
    pub id: NodeId,
    pub name: String,
    pub local: Transform,
    pub world_position: Vec3,
    pub mesh: Option<MeshBinding>,
    pub children: Vec<FrameNode>,
}

impl FrameNode {
    /// This node followed by its descendants, depth first.
    pub fn walk(&self) -> Vec<&FrameNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}

/// Everything the renderer needs to draw one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub time: f64,
    pub view: RenderView,
    pub stage: StageConfig,
    pub roots: Vec<FrameNode>,
}

impl Frame {
    /// All nodes, depth first from each root in order.
    pub fn nodes(&self) -> Vec<&FrameNode> {
        self.roots.iter().flat_map(FrameNode::walk).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Nodes that carry geometry.
    pub fn drawable_count(&self) -> usize {
        self.nodes().iter().filter(|n| n.mesh.is_some()).count()
    }

    pub fn find(&self, id: NodeId) -> Option<&FrameNode> {
        self.nodes().into_iter().find(|n| n.id == id)
    }
}

/// Build the frame tree from the current graph state.
///
/// Pure: reads the graph, never writes it.
pub fn compose_frame(
    graph: &SceneGraph,
    stage: &StageConfig,
    view: &RenderView,
    tick: u64,
    time: f64,
) -> Frame {
    let roots = graph
        .roots()
        .filter_map(|id| compose_node(graph, id, Mat4::IDENTITY))
        .collect();
    Frame {
        tick,
        time,
        view: *view,
        stage: stage.clone(),
        roots,
    }
}

fn compose_node(graph: &SceneGraph, id: NodeId, parent: Mat4) -> Option<FrameNode> {
    let node = graph.get(id)?;
    let world = parent * node.transform.to_matrix();
    let children = node
        .children()
        .iter()
        .filter_map(|child| compose_node(graph, *child, world))
        .collect();
    Some(FrameNode {
        id,
        name: node.name.clone(),
        local: node.transform,
        world_position: world.transform_point3(Vec3::ZERO),
        mesh: node.mesh,
        children,
    })
}
