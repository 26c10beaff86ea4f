use rand::Rng;
use rand::seq::SliceRandom;

use crate::AnimError;

/// Pick an initial wing phase uniformly from a discrete candidate set.
pub fn pick_initial_phase<R: Rng + ?Sized>(candidates: &[f32], rng: &mut R) -> Result<f32, AnimError> {
    candidates
        .choose(rng)
        .copied()
        .ok_or(AnimError::EmptyCandidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn single_candidate_is_always_picked() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(pick_initial_phase(&[-FRAC_PI_4], &mut rng), Ok(-FRAC_PI_4));
        }
    }

    #[test]
    fn empty_set_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_initial_phase(&[], &mut rng), Err(AnimError::EmptyCandidates));
    }

    #[test]
    fn every_candidate_is_reachable() {
        let candidates = [-0.5, -0.25, 0.0];
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let phase = pick_initial_phase(&candidates, &mut rng).unwrap();
            let i = candidates.iter().position(|c| *c == phase).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn same_seed_same_pick() {
        let candidates = [0.1, 0.2, 0.3, 0.4];
        let a = pick_initial_phase(&candidates, &mut StdRng::seed_from_u64(42));
        let b = pick_initial_phase(&candidates, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
