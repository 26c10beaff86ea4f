//! Animation: per-instance wing-flap controller and the channels it drives.
//!
//! # Invariants
//! - Both wing channels of one animator are sampled at the same clock time.
//! - No transform is written before the whole rig (root + both wings) resolves.
//! - After teardown nothing is scheduled and nothing is written.

mod clock;
mod flap;
mod float;
mod oscillation;
mod phase;

pub use clock::AnimationClock;
pub use flap::{
    AnimatorStatus, FlapHandle, FlapParams, PhaseSign, ResolvedRig, RigSlot, WingFlapAnimator,
    WingRig, WingState,
};
pub use float::FloatMotion;
pub use oscillation::Oscillation;
pub use phase::pick_initial_phase;

/// Errors from animation setup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimError {
    /// Internal precondition: a rig handle is missing or detached. Callers defer.
    #[error("rig not ready: {0} handle unresolved")]
    NotReady(RigSlot),
    #[error("phase candidate set is empty")]
    EmptyCandidates,
    #[error("animator was torn down")]
    TornDown,
}
