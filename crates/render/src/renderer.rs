use std::fmt::Write as _;

use glam::Vec3;

use crate::{Frame, FrameNode};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Device pixel ratio is clamped into this range.
    pub pixel_ratio: (f32, f32),
    pub shadows: bool,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 8.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            pixel_ratio: (1.0, 2.0),
            shadows: true,
        }
    }
}

impl RenderView {
    pub fn clamp_pixel_ratio(&self, device_ratio: f32) -> f32 {
        device_ratio.clamp(self.pixel_ratio.0, self.pixel_ratio.1)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer receives a fully composed frame once per tick. It never sees
/// the scene graph, so it cannot mutate scene state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Draw one frame.
    fn render(&mut self, frame: &Frame) -> Self::Output;
}

/// Debug text renderer: stands in for the GPU backend.
///
/// Produces a human-readable dump of the frame. Useful for CLI output,
/// logging, and testing the render interface.
#[derive(Debug)]
pub struct DebugTextRenderer {
    frames: u64,
    device_ratio: f32,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self {
            frames: 0,
            device_ratio: 1.0,
        }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report frames as if drawn on a display with this device pixel ratio.
    pub fn with_device_ratio(mut self, ratio: f32) -> Self {
        self.device_ratio = ratio;
        self
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &Frame) -> String {
        self.frames += 1;
        let mut out = String::new();
        let _ = writeln!(out, "=== Frame (tick={}, t={:.3}s) ===", frame.tick, frame.time);
        let _ = writeln!(
            out,
            "Nodes: {} (drawable: {})",
            frame.node_count(),
            frame.drawable_count()
        );
        let v = &frame.view;
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0} dpr={:.1}",
            v.eye.x,
            v.eye.y,
            v.eye.z,
            v.target.x,
            v.target.y,
            v.target.z,
            v.fov_degrees,
            v.clamp_pixel_ratio(self.device_ratio)
        );
        let s = &frame.stage;
        let _ = writeln!(
            out,
            "Lights: ambient={:.2} spot=({:.1}, {:.1}, {:.1}) angle={:.2} env={}",
            s.ambient.intensity,
            s.spot.position.x,
            s.spot.position.y,
            s.spot.position.z,
            s.spot.angle,
            s.environment.path
        );

        for root in &frame.roots {
            write_node(&mut out, root, 1);
        }
        out
    }
}

fn write_node(out: &mut String, node: &FrameNode, depth: usize) {
    let p = node.world_position;
    let r = node.local.rotation;
    let _ = write!(
        out,
        "{:indent$}[{}] {} pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3})",
        "",
        node.id.0,
        node.name,
        p.x,
        p.y,
        p.z,
        r.x,
        r.y,
        r.z,
        indent = depth * 2
    );
    if let Some(mesh) = node.mesh {
        let _ = write!(out, " mesh={:#x}", mesh.asset.0);
    }
    out.push('\n');
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StageConfig, compose_frame};
    use papillon_common::Transform;
    use papillon_kernel::SceneGraph;

    #[test]
    fn debug_renderer_empty_frame() {
        let frame = compose_frame(&SceneGraph::new(), &StageConfig::default(), &RenderView::default(), 0, 0.0);
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&frame);

        assert!(output.contains("tick=0"));
        assert!(output.contains("Nodes: 0"));
        assert!(output.contains("forest_slope_1k.hdr"));
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn debug_renderer_with_nodes() {
        let mut graph = SceneGraph::new();
        let root = graph.attach(None, "float", Transform::default()).unwrap();
        graph
            .attach(Some(root), "butterfly", Transform::from_position(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();

        let frame = compose_frame(&graph, &StageConfig::default(), &RenderView::default(), 1, 0.016);
        let output = DebugTextRenderer::new().render(&frame);

        assert!(output.contains("Nodes: 2"));
        assert!(output.contains("butterfly pos=(1.00, 2.00, 3.00)"));
    }

    #[test]
    fn debug_renderer_clamps_device_ratio() {
        let frame = compose_frame(&SceneGraph::new(), &StageConfig::default(), &RenderView::default(), 0, 0.0);
        assert!(DebugTextRenderer::new().render(&frame).contains("dpr=1.0"));
        assert!(
            DebugTextRenderer::new()
                .with_device_ratio(3.0)
                .render(&frame)
                .contains("dpr=2.0")
        );
        assert!(
            DebugTextRenderer::new()
                .with_device_ratio(1.5)
                .render(&frame)
                .contains("dpr=1.5")
        );
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 75.0);
        assert_eq!(view.eye, Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(view.clamp_pixel_ratio(3.0), 2.0);
        assert_eq!(view.clamp_pixel_ratio(0.5), 1.0);
    }
}
