use std::fmt;

use glam::Vec3;
use papillon_common::{FlapConfig, NodeId};
use papillon_kernel::SceneGraph;
use rand::Rng;

use crate::{AnimError, Oscillation, pick_initial_phase};

/// Which way a wing swings on its first leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseSign {
    Positive,
    Negative,
}

impl PhaseSign {
    pub fn as_f32(self) -> f32 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Current yaw of one wing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingState {
    pub angle: f32,
    pub phase_sign: PhaseSign,
}

/// One of the three transform handles an animator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigSlot {
    Root,
    LeftWing,
    RightWing,
}

impl fmt::Display for RigSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::LeftWing => write!(f, "left wing"),
            Self::RightWing => write!(f, "right wing"),
        }
    }
}

/// Transform handles of one instance, filled in as its nodes attach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WingRig {
    pub root: Option<NodeId>,
    pub left_wing: Option<NodeId>,
    pub right_wing: Option<NodeId>,
}

/// A rig whose three handles are all attached to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRig {
    pub root: NodeId,
    pub left_wing: NodeId,
    pub right_wing: NodeId,
}

impl WingRig {
    /// All three handles, or the first one that is missing or detached.
    pub fn resolve(&self, graph: &SceneGraph) -> Result<ResolvedRig, AnimError> {
        let attached = |slot: RigSlot, id: Option<NodeId>| {
            id.filter(|id| graph.contains(*id))
                .ok_or(AnimError::NotReady(slot))
        };
        Ok(ResolvedRig {
            root: attached(RigSlot::Root, self.root)?,
            left_wing: attached(RigSlot::LeftWing, self.left_wing)?,
            right_wing: attached(RigSlot::RightWing, self.right_wing)?,
        })
    }
}

/// Oscillation parameters shared by both wings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlapParams {
    pub amplitude: f32,
    pub period: f64,
    pub root_tilt: Vec3,
}

impl From<&FlapConfig> for FlapParams {
    fn from(config: &FlapConfig) -> Self {
        Self {
            amplitude: config.amplitude(),
            period: f64::from(config.period),
            root_tilt: config.root_tilt,
        }
    }
}

/// The two scheduled oscillations of a running animator.
///
/// Dropping the handle cancels both channels; nothing else holds them.
#[derive(Debug, Clone, PartialEq)]
pub struct FlapHandle {
    rig: ResolvedRig,
    left: Oscillation,
    right: Oscillation,
    started_at: f64,
}

impl FlapHandle {
    pub fn rig(&self) -> ResolvedRig {
        self.rig
    }

    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Left and right yaw at clock time `now`, from the same elapsed value.
    pub fn sample(&self, now: f64) -> (f32, f32) {
        let elapsed = now - self.started_at;
        (self.left.sample(elapsed), self.right.sample(elapsed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorStatus {
    /// Waiting for the rig to resolve.
    Pending,
    Running,
    /// Torn down; will never write again.
    Stopped,
}

/// Drives the wings of one model instance.
///
/// Starts once its rig resolves: writes the root tilt and the mirrored
/// initial wing yaw, then ping-pongs both wings by `amplitude` each `period`
/// in opposite directions.
#[derive(Debug, Clone)]
pub struct WingFlapAnimator {
    params: FlapParams,
    initial_phase: f32,
    left: WingState,
    right: WingState,
    handle: Option<FlapHandle>,
    stopped: bool,
}

impl WingFlapAnimator {
    pub fn new(params: FlapParams, initial_phase: f32) -> Self {
        Self {
            params,
            initial_phase,
            left: WingState {
                angle: initial_phase,
                phase_sign: PhaseSign::Negative,
            },
            right: WingState {
                angle: -initial_phase,
                phase_sign: PhaseSign::Positive,
            },
            handle: None,
            stopped: false,
        }
    }

    /// Build an animator whose initial phase is drawn from the config's candidates.
    pub fn from_config<R: Rng + ?Sized>(config: &FlapConfig, rng: &mut R) -> Result<Self, AnimError> {
        let phase = pick_initial_phase(&config.phase_candidates, rng)?;
        Ok(Self::new(FlapParams::from(config), phase))
    }

    pub fn params(&self) -> &FlapParams {
        &self.params
    }

    pub fn initial_phase(&self) -> f32 {
        self.initial_phase
    }

    pub fn left(&self) -> WingState {
        self.left
    }

    pub fn right(&self) -> WingState {
        self.right
    }

    pub fn handle(&self) -> Option<&FlapHandle> {
        self.handle.as_ref()
    }

    pub fn status(&self) -> AnimatorStatus {
        if self.stopped {
            AnimatorStatus::Stopped
        } else if self.handle.is_some() {
            AnimatorStatus::Running
        } else {
            AnimatorStatus::Pending
        }
    }

    /// Number of oscillation channels still scheduled.
    pub fn scheduled_channels(&self) -> usize {
        if self.handle.is_some() { 2 } else { 0 }
    }

    /// Write the initial pose and schedule both channels, starting at `now`.
    ///
    /// Does nothing if already running. Fails with `NotReady` without touching
    /// the graph when any of the three rig handles is unresolved.
    pub fn try_start(&mut self, graph: &mut SceneGraph, rig: &WingRig, now: f64) -> Result<(), AnimError> {
        if self.stopped {
            return Err(AnimError::TornDown);
        }
        if self.handle.is_some() {
            return Ok(());
        }
        let rig = rig.resolve(graph)?;

        let tilt = self.params.root_tilt;
        let phase = self.initial_phase;
        graph.update_transform(rig.root, |t| t.rotation = tilt);
        graph.update_transform(rig.left_wing, |t| t.rotation.y = phase);
        graph.update_transform(rig.right_wing, |t| t.rotation.y = -phase);
        self.left.angle = phase;
        self.right.angle = -phase;

        let amplitude = self.params.amplitude;
        self.handle = Some(FlapHandle {
            rig,
            left: Oscillation::new(phase, self.left.phase_sign.as_f32() * amplitude, self.params.period),
            right: Oscillation::new(-phase, self.right.phase_sign.as_f32() * amplitude, self.params.period),
            started_at: now,
        });
        tracing::debug!(phase, amplitude, start = now, "wing flap started");
        Ok(())
    }

    /// Advance to clock time `now`.
    ///
    /// A pending animator re-checks readiness and, once ready, only writes the
    /// initial pose on this tick. A running animator writes both wing angles.
    pub fn tick(&mut self, graph: &mut SceneGraph, rig: &WingRig, now: f64) -> AnimatorStatus {
        let Some(handle) = &self.handle else {
            if self.stopped {
                return AnimatorStatus::Stopped;
            }
            if let Err(err) = self.try_start(graph, rig, now) {
                tracing::trace!(%err, "wing flap deferred");
            }
            return self.status();
        };

        let (left, right) = handle.sample(now);
        let ResolvedRig {
            left_wing,
            right_wing,
            ..
        } = handle.rig();
        if !graph.contains(left_wing) || !graph.contains(right_wing) {
            tracing::warn!("wing nodes detached under a running animator; cancelling");
            self.handle = None;
            return self.status();
        }
        graph.update_transform(left_wing, |t| t.rotation.y = left);
        graph.update_transform(right_wing, |t| t.rotation.y = right);
        self.left.angle = left;
        self.right.angle = right;
        AnimatorStatus::Running
    }

    /// Cancel both channels. Safe to call any number of times.
    ///
    /// Returns `true` if channels were still scheduled.
    pub fn teardown(&mut self) -> bool {
        self.stopped = true;
        let cancelled = self.handle.take().is_some();
        if cancelled {
            tracing::debug!("wing flap cancelled");
        }
        cancelled
    }
}
