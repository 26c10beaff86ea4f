use std::fmt;
use std::sync::Arc;

use glam::Vec3;
use papillon_anim::AnimatorStatus;
use papillon_assets::ModelAsset;
use papillon_common::SceneConfig;
use papillon_kernel::SceneGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{ModelInstance, PlacementVolume, SceneError};

/// RNG for scene construction: seeded when asked, OS entropy otherwise.
pub fn scene_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Per-tick animator tally across the pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStatus {
    pub pending: usize,
    pub running: usize,
    pub stopped: usize,
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pending={} running={} stopped={}",
            self.pending, self.running, self.stopped
        )
    }
}

/// Fixed set of instances scattered through the placement volume.
#[derive(Debug, Default)]
pub struct InstancePool {
    instances: Vec<ModelInstance>,
}

impl InstancePool {
    /// Spawn `config.instance_count` instances at independent random positions.
    pub fn populate<R: Rng + ?Sized>(
        graph: &mut SceneGraph,
        config: &SceneConfig,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        let volume = PlacementVolume::from(config.placement);
        let instances = (0..config.instance_count)
            .map(|_| {
                let position = volume.sample(&mut *rng);
                ModelInstance::spawn(graph, position, config, &mut *rng)
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(count = instances.len(), seeded = config.seed.is_some(), "instance pool populated");
        Ok(Self { instances })
    }

    /// Populate with an RNG derived from `config.seed`.
    pub fn from_config(graph: &mut SceneGraph, config: &SceneConfig) -> Result<Self, SceneError> {
        Self::populate(graph, config, &mut scene_rng(config.seed))
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[ModelInstance] {
        &self.instances
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.instances.iter().map(ModelInstance::position).collect()
    }

    /// Give every live instance its wings.
    pub fn attach_asset(&mut self, graph: &mut SceneGraph, asset: &Arc<ModelAsset>) -> Result<(), SceneError> {
        for instance in self.instances.iter_mut().filter(|i| !i.is_torn_down()) {
            instance.attach_asset(graph, asset)?;
        }
        Ok(())
    }

    /// Advance every instance to clock time `now`.
    ///
    /// Every transform write lands in the graph's event log, which only
    /// shrinks on `SceneGraph::drain_events`. Callers driving the pool outside
    /// `SceneRunner` must drain once per tick or the log grows without bound.
    pub fn update(&mut self, graph: &mut SceneGraph, now: f64) -> PoolStatus {
        let mut status = PoolStatus::default();
        for instance in &mut self.instances {
            match instance.update(graph, now) {
                AnimatorStatus::Pending => status.pending += 1,
                AnimatorStatus::Running => status.running += 1,
                AnimatorStatus::Stopped => status.stopped += 1,
            }
        }
        status
    }

    /// Tear down every instance. Returns how many were still live.
    pub fn teardown(&mut self, graph: &mut SceneGraph) -> usize {
        let count = self
            .instances
            .iter_mut()
            .map(|i| i.teardown(graph))
            .filter(|torn| *torn)
            .count();
        if count > 0 {
            tracing::info!(count, "instance pool torn down");
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papillon_assets::{Geometry, Material};

    fn config(seed: u64) -> SceneConfig {
        SceneConfig {
            seed: Some(seed),
            ..SceneConfig::default()
        }
    }

    fn asset() -> Arc<ModelAsset> {
        Arc::new(ModelAsset::new(
            Geometry {
                name: "wing".into(),
                vertex_count: 4,
                index_count: 6,
            },
            Material::default(),
        ))
    }

    #[test]
    fn populates_configured_count() {
        let mut graph = SceneGraph::new();
        let pool = InstancePool::from_config(&mut graph, &config(1)).unwrap();
        assert_eq!(pool.len(), 10);
        // float wrapper + root per instance
        assert_eq!(graph.len(), 20);
    }

    #[test]
    fn positions_within_bounds() {
        for seed in 0..20 {
            let mut graph = SceneGraph::new();
            let pool = InstancePool::from_config(&mut graph, &config(seed)).unwrap();
            for p in pool.positions() {
                assert!((-10.0..10.0).contains(&p.x));
                assert!((-10.0..10.0).contains(&p.y));
                assert!(p.z > -20.0 && p.z <= 0.0);
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let mut g1 = SceneGraph::new();
        let mut g2 = SceneGraph::new();
        let a = InstancePool::from_config(&mut g1, &config(77)).unwrap();
        let b = InstancePool::from_config(&mut g2, &config(77)).unwrap();
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn unseeded_pools_differ() {
        let mut g1 = SceneGraph::new();
        let mut g2 = SceneGraph::new();
        let a = InstancePool::from_config(&mut g1, &SceneConfig::default()).unwrap();
        let b = InstancePool::from_config(&mut g2, &SceneConfig::default()).unwrap();
        assert_ne!(a.positions(), b.positions());
    }

    #[test]
    fn invalid_config_fails_population() {
        let mut cfg = config(1);
        cfg.flap.phase_candidates.clear();
        let mut graph = SceneGraph::new();
        assert!(matches!(
            InstancePool::from_config(&mut graph, &cfg),
            Err(SceneError::Config(_))
        ));
        assert!(graph.is_empty());
    }

    #[test]
    fn zero_instances_is_allowed() {
        let mut cfg = config(1);
        cfg.instance_count = 0;
        let mut graph = SceneGraph::new();
        let pool = InstancePool::from_config(&mut graph, &cfg).unwrap();
        assert!(pool.is_empty());
    }

    #[test]
    fn update_tallies_animators() {
        let mut graph = SceneGraph::new();
        let mut pool = InstancePool::from_config(&mut graph, &config(3)).unwrap();
        let status = pool.update(&mut graph, 0.0);
        assert_eq!(status.pending, 10);

        pool.attach_asset(&mut graph, &asset()).unwrap();
        let status = pool.update(&mut graph, 0.016);
        assert_eq!(status.running, 10);
        assert_eq!(status.to_string(), "pending=0 running=10 stopped=0");
    }

    #[test]
    fn update_log_stays_bounded_when_drained() {
        let mut graph = SceneGraph::new();
        let mut pool = InstancePool::from_config(&mut graph, &config(5)).unwrap();
        graph.drain_events();

        // Without an asset only the float wrappers move: one write per instance.
        for tick in 1..=100 {
            pool.update(&mut graph, tick as f64 * 0.016);
            assert_eq!(graph.drain_events().len(), 10);
        }
        assert!(graph.events().is_empty());

        for tick in 0..50 {
            pool.update(&mut graph, 2.0 + tick as f64 * 0.016);
        }
        assert_eq!(graph.events().len(), 500);
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut graph = SceneGraph::new();
        let mut pool = InstancePool::from_config(&mut graph, &config(4)).unwrap();
        pool.attach_asset(&mut graph, &asset()).unwrap();
        pool.update(&mut graph, 0.0);

        assert_eq!(pool.teardown(&mut graph), 10);
        assert_eq!(pool.teardown(&mut graph), 0);
        assert!(graph.is_empty());
        assert!(
            pool.instances()
                .iter()
                .all(|i| i.animator().scheduled_channels() == 0)
        );
        assert_eq!(pool.update(&mut graph, 1.0).stopped, 10);
    }
}
