//! Move advisors: external sources of move proposals.
//!
//! An advisor sees the board as a value matrix plus the directions that
//! already failed this turn, and proposes one direction with a rationale.
//! It may be wrong: [`Game::play_advised_turn`](crate::game::Game::play_advised_turn)
//! feeds failed proposals back through the avoid list and retries within
//! the configured budget.
//!
//! Network-backed advisors (language models and the like) live outside
//! this crate. They implement [`MoveAdvisor`] and typically turn the
//! model's reply into a [`Proposal`] with [`Proposal::from_json`].
//! [`SYSTEM_PROMPT`] and [`function_schema`] give such an advisor its
//! standing instructions and tool-call schema.

mod random;
mod request;
mod turn;

use serde::{Deserialize, Serialize};

use crate::core::AdvisorError;

pub use random::RandomAdvisor;
pub use request::{function_schema, AdvisorRequest, Proposal, FUNCTION_NAME, SYSTEM_PROMPT};
pub use turn::AdvisedTurn;

/// Where a game's moves come from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    /// Keyboard or other direct input.
    #[default]
    Human,
    /// Uniformly random proposals.
    Random,
    /// A named model-backed advisor.
    Model(String),
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentKind::Human => write!(f, "human"),
            AgentKind::Random => write!(f, "random"),
            AgentKind::Model(name) => write!(f, "{name}"),
        }
    }
}

/// Source of move proposals.
pub trait MoveAdvisor {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Propose one direction for the board in `request`.
    fn propose(&mut self, request: &AdvisorRequest) -> Result<Proposal, AdvisorError>;
}

impl<F> MoveAdvisor for F
where
    F: FnMut(&AdvisorRequest) -> Result<Proposal, AdvisorError>,
{
    fn name(&self) -> &str {
        "closure"
    }

    fn propose(&mut self, request: &AdvisorRequest) -> Result<Proposal, AdvisorError> {
        self(request)
    }
}
