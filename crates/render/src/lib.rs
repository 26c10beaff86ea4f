//! Rendering adapter: frame composition and a renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate the scene graph; they only see composed frames.
//! - A frame is composed after every animator has written for that tick.
//!
//! The GPU backend lives outside this workspace. `DebugTextRenderer` stands in
//! for it in the CLI and in tests; swap in a real backend by implementing
//! `Renderer`.

mod frame;
mod renderer;
mod runner;
mod stage;

pub use frame::{Frame, FrameNode, compose_frame};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use runner::SceneRunner;
pub use stage::{AmbientLight, Backdrop, EnvironmentMap, SpotLight, StageConfig, TextOverlay};
