//! Scene kernel: the authoritative tree of transform nodes.
//!
//! # Invariants
//! - All node mutations flow through explicit operations and are logged.
//! - Removing a node removes its whole subtree.
//! - Iteration order is allocation order (BTreeMap keyed by `NodeId`).

pub mod graph;

pub use graph::{GraphError, GraphEvent, MeshBinding, Node, SceneGraph};
