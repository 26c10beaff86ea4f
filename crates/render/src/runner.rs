use papillon_anim::AnimationClock;
use papillon_assets::{AssetSlot, ModelLoader};
use papillon_common::SceneConfig;
use papillon_kernel::SceneGraph;
use papillon_scene::{InstancePool, PoolStatus, SceneError};

use crate::{RenderView, Renderer, StageConfig, compose_frame};

/// Drives the scene once per display refresh.
///
/// Each tick: advance the shared clock, poll the model load, attach wings
/// on the tick it resolves, advance every instance, then compose the frame
/// and hand it to the renderer.
pub struct SceneRunner<L: ModelLoader, R: Renderer> {
    graph: SceneGraph,
    pool: InstancePool,
    slot: AssetSlot,
    loader: L,
    renderer: R,
    clock: AnimationClock,
    stage: StageConfig,
    view: RenderView,
    status: PoolStatus,
    writes_last_tick: usize,
    shut_down: bool,
}

impl<L: ModelLoader, R: Renderer> SceneRunner<L, R> {
    pub fn new(
        config: &SceneConfig,
        stage: StageConfig,
        view: RenderView,
        loader: L,
        renderer: R,
    ) -> Result<Self, SceneError> {
        let mut graph = SceneGraph::new();
        let pool = InstancePool::from_config(&mut graph, config)?;
        graph.drain_events();
        Ok(Self {
            graph,
            pool,
            slot: AssetSlot::new(config.asset.model_path.clone()),
            loader,
            renderer,
            clock: AnimationClock::new(),
            stage,
            view,
            status: PoolStatus::default(),
            writes_last_tick: 0,
            shut_down: false,
        })
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn pool(&self) -> &InstancePool {
        &self.pool
    }

    pub fn slot(&self) -> &AssetSlot {
        &self.slot
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Animator tally from the last tick.
    pub fn status(&self) -> PoolStatus {
        self.status
    }

    /// Graph mutations made during the last tick.
    pub fn writes_last_tick(&self) -> usize {
        self.writes_last_tick
    }

    /// Advance by `dt` seconds and render one frame.
    pub fn tick(&mut self, dt: f64) -> Result<R::Output, SceneError> {
        if self.shut_down {
            return Err(SceneError::TornDown);
        }
        let now = self.clock.advance(dt);

        if let Some(asset) = self.slot.poll(&mut self.loader) {
            self.pool.attach_asset(&mut self.graph, &asset)?;
        }

        let status = self.pool.update(&mut self.graph, now);
        if status != self.status {
            tracing::debug!(%status, tick = self.clock.ticks(), "animator status changed");
            self.status = status;
        }
        self.writes_last_tick = self.graph.drain_events().len();

        let frame = compose_frame(&self.graph, &self.stage, &self.view, self.clock.ticks(), now);
        Ok(self.renderer.render(&frame))
    }

    /// Cancel every animator and clear the scene. Idempotent.
    pub fn shutdown(&mut self) -> usize {
        if self.shut_down {
            return 0;
        }
        self.shut_down = true;
        let count = self.pool.teardown(&mut self.graph);
        self.graph.drain_events();
        count
    }
}

impl<L: ModelLoader, R: Renderer> Drop for SceneRunner<L, R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
