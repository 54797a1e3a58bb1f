//! The random agent.

use crate::core::{AdvisorError, Direction, GameRng};

use super::{AdvisorRequest, MoveAdvisor, Proposal};

/// Proposes a uniformly random direction, skipping directions already
/// known to fail this turn.
#[derive(Clone, Debug)]
pub struct RandomAdvisor {
    rng: GameRng,
}

impl RandomAdvisor {
    /// Create an advisor with its own seeded stream.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl MoveAdvisor for RandomAdvisor {
    fn name(&self) -> &str {
        "random"
    }

    fn propose(&mut self, request: &AdvisorRequest) -> Result<Proposal, AdvisorError> {
        let mut candidates: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| !request.avoid.contains(d))
            .collect();
        if candidates.is_empty() {
            candidates = Direction::ALL.to_vec();
        }
        let direction = *self
            .rng
            .choose(&candidates)
            .ok_or_else(|| AdvisorError::Transport("no direction to choose from".into()))?;
        Ok(Proposal::new(direction, "Random"))
    }
}
