//! Driving a turn from an advisor.

use crate::core::{Direction, GameError, Result};
use crate::game::{Game, MoveOutcome};

use super::{AdvisorRequest, MoveAdvisor};

/// A turn an advisor completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvisedTurn {
    pub direction: Direction,
    pub reason: String,
    /// Proposals consumed, including the one that moved.
    pub attempts: u32,
    pub outcome: MoveOutcome,
}

impl Game {
    /// Ask `advisor` for moves until one changes the board.
    ///
    /// Each advisor error and each proposal that moves nothing uses one of
    /// `advisor_retries` attempts; failed directions are passed back as the
    /// avoid list. On exhaustion the game stays `Ready` and untouched apart
    /// from bad-move statistics.
    ///
    /// Fails with [`GameError::NotReady`] unless the game is `Ready`; call
    /// [`Game::settle`] or [`Game::advance`] first.
    pub fn play_advised_turn(&mut self, advisor: &mut dyn MoveAdvisor) -> Result<AdvisedTurn> {
        if !self.phase().is_ready() {
            return Err(GameError::NotReady);
        }

        let budget = self.config().advisor_retries.max(1);
        let mut attempts = 0;
        while attempts < budget {
            attempts += 1;
            let request = AdvisorRequest::new(
                self.board_matrix(),
                self.telemetry().avoid_list().to_vec(),
            );

            let proposal = match advisor.propose(&request) {
                Ok(proposal) => proposal,
                Err(err) => {
                    log::warn!(
                        "{} failed on attempt {attempts}/{budget}: {err}",
                        advisor.name()
                    );
                    continue;
                }
            };

            let outcome =
                self.request_move_with_reason(proposal.direction, Some(proposal.reason.as_str()));
            match outcome {
                MoveOutcome::Applied { .. } => {
                    log::debug!(
                        "{} moved {} after {attempts} attempt(s): {}",
                        advisor.name(),
                        proposal.direction,
                        proposal.reason
                    );
                    return Ok(AdvisedTurn {
                        direction: proposal.direction,
                        reason: proposal.reason,
                        attempts,
                        outcome,
                    });
                }
                MoveOutcome::NoMove => {
                    log::debug!("{} proposed {}, which moved nothing", advisor.name(), proposal.direction);
                }
                MoveOutcome::Rejected(_) => return Err(GameError::NotReady),
            }
        }

        let avoided = self.telemetry().avoid_list().to_vec();
        log::warn!(
            "{} exhausted {attempts} attempts, avoided {:?}",
            advisor.name(),
            avoided
        );
        Err(GameError::AdvisorExhausted { attempts, avoided })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{Proposal, RandomAdvisor};
    use crate::core::{AdvisorError, GameConfig};
    use crate::game::Phase;
    use crate::grid::Board;

    fn corner_game(retries: u32) -> Game {
        // Only DOWN and RIGHT move this board
        let board = Board::from_matrix(&[[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        Game::from_board(GameConfig::default().with_advisor_retries(retries), board)
    }

    #[test]
    fn test_retries_with_growing_avoid_list() {
        let mut game = corner_game(5);
        let mut seen = Vec::new();
        let mut script = vec![Direction::Right, Direction::Left, Direction::Up];
        let mut advisor = |req: &AdvisorRequest| -> std::result::Result<Proposal, AdvisorError> {
            seen.push(req.avoid.clone());
            Ok(Proposal::new(script.pop().unwrap(), "scripted"))
        };

        let turn = game.play_advised_turn(&mut advisor).unwrap();
        assert_eq!(turn.direction, Direction::Right);
        assert_eq!(turn.attempts, 3);
        assert!(turn.outcome.is_applied());
        assert_eq!(
            seen,
            vec![vec![], vec![Direction::Up], vec![Direction::Left, Direction::Up]]
        );
        assert!(game.is_locked());
    }

    #[test]
    fn test_advisor_errors_consume_budget() {
        let mut game = corner_game(3);
        let mut calls = 0;
        let mut advisor = |_: &AdvisorRequest| -> std::result::Result<Proposal, AdvisorError> {
            calls += 1;
            if calls < 3 {
                Err(AdvisorError::Unparsable("garbage".into()))
            } else {
                Ok(Proposal::new(Direction::Down, "finally"))
            }
        };
        let turn = game.play_advised_turn(&mut advisor).unwrap();
        assert_eq!(turn.attempts, 3);
        assert_eq!(turn.reason, "finally");
        assert_eq!(game.telemetry().reasons[0], "finally");
    }

    #[test]
    fn test_exhaustion_leaves_game_ready() {
        let mut game = corner_game(2);
        let before = game.board().clone();
        let mut advisor = |_: &AdvisorRequest| -> std::result::Result<Proposal, AdvisorError> {
            Ok(Proposal::new(Direction::Up, "stubborn"))
        };

        let err = game.play_advised_turn(&mut advisor).unwrap_err();
        assert_eq!(
            err,
            GameError::AdvisorExhausted {
                attempts: 2,
                avoided: vec![Direction::Up],
            }
        );
        assert_eq!(game.phase(), Phase::Ready);
        assert_eq!(game.board(), &before);
        assert_eq!(game.pending_spawns(), 0);
    }

    #[test]
    fn test_repeated_proposal_sent_back_once() {
        let mut game = corner_game(4);
        let mut seen = Vec::new();
        let mut script = vec![Direction::Down, Direction::Left, Direction::Up, Direction::Left];
        let mut advisor = |req: &AdvisorRequest| -> std::result::Result<Proposal, AdvisorError> {
            seen.push(req.avoid.clone());
            Ok(Proposal::new(script.pop().unwrap(), "scripted"))
        };

        let turn = game.play_advised_turn(&mut advisor).unwrap();
        assert_eq!(turn.attempts, 4);
        assert_eq!(seen[3], vec![Direction::Left, Direction::Up]);
        assert_eq!(game.telemetry().total_bad_moves, 3);
    }

    #[test]
    fn test_stuck_board_is_not_ready() {
        let board = Board::from_matrix(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let mut game = Game::from_board(GameConfig::default(), board);
        let mut advisor = RandomAdvisor::new(1);
        assert_eq!(
            game.play_advised_turn(&mut advisor).unwrap_err(),
            GameError::NotReady
        );
        assert_eq!(game.phase(), Phase::Over { won: false });
    }

    #[test]
    fn test_not_ready() {
        let mut game = corner_game(5);
        game.request_move(Direction::Down);
        let mut advisor = RandomAdvisor::new(1);
        assert_eq!(
            game.play_advised_turn(&mut advisor).unwrap_err(),
            GameError::NotReady
        );
    }

    #[test]
    fn test_random_advisor_finds_a_move() {
        let mut game = corner_game(5);
        let mut advisor = RandomAdvisor::new(4);
        let turn = game.play_advised_turn(&mut advisor).unwrap();
        assert!(matches!(turn.direction, Direction::Down | Direction::Right));
        assert_eq!(turn.reason, "Random");
    }
}
