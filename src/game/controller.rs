//! The turn state machine.
//!
//! ```text
//!            Restart (any state)
//!                  |
//!                  v
//!   +-------->  Ready  --Move(NoMove)--> Ready
//!   |             |
//!   |        Move(moved)
//!   |             v
//!   +--spawn--  Locked  --spawn--> Over { won }
//! ```
//!
//! A successful move locks the game and schedules a spawn `spawn_delay`
//! later on the controller's virtual clock. Moves requested while locked
//! or over are rejected. The clock only advances through
//! [`Game::advance`] and [`Game::settle`], so a host decides how real time
//! maps onto it (a UI timer, or instantly for automated play).
//!
//! Every scheduled spawn remembers the generation that scheduled it.
//! `restart` starts a new generation and a spawn from an older one is
//! dropped when it comes due.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::advisor::AgentKind;
use crate::core::{Direction, GameConfig, GameRng};
use crate::grid::{has_valid_move, shift, spawn_tile, Board, BoardMatrix, Merge, ShiftOutcome};

use super::event::{GameEvent, RejectReason};
use super::telemetry::Telemetry;

/// Controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting moves.
    Ready,
    /// A move was applied and its spawn is pending.
    Locked,
    /// Terminal.
    Over { won: bool },
}

impl Phase {
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Phase::Ready)
    }

    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Phase::Over { .. })
    }
}

/// What a move request did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The board changed; a spawn is now pending.
    Applied {
        score_delta: u64,
        merges: SmallVec<[Merge; 8]>,
    },
    /// Nothing could move in that direction. Recorded as a bad move.
    NoMove,
    /// The game was locked or over; nothing was recorded.
    Rejected(RejectReason),
}

impl MoveOutcome {
    /// True if the board changed.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }
}

/// A spawn waiting for its due time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingSpawn {
    generation: u64,
    due: Duration,
}

/// One game of 2048.
///
/// Owns its board, RNG and id sequence; nothing is shared between games.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    rng: GameRng,
    phase: Phase,
    score: u64,
    max_tile: u32,
    generation: u64,
    clock: Duration,
    pending: VecDeque<PendingSpawn>,
    events: VecDeque<GameEvent>,
    telemetry: Telemetry,
    agent: AgentKind,
}

impl Game {
    /// Start a new game seeded from `config.seed`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = GameRng::new(config.seed);
        let mut game = Self::blank(config, rng);
        game.restart();
        game
    }

    fn blank(config: GameConfig, rng: GameRng) -> Self {
        Self {
            config,
            board: Board::new(),
            rng,
            phase: Phase::Ready,
            score: 0,
            max_tile: 0,
            generation: 0,
            clock: Duration::ZERO,
            pending: VecDeque::new(),
            events: VecDeque::new(),
            telemetry: Telemetry::new(),
            agent: AgentKind::Human,
        }
    }

    /// Start a game from an explicit board.
    ///
    /// Used to resume from a position or set up puzzles; the board keeps
    /// its tile ids. The board is judged like a freshly spawned one, so a
    /// stuck board starts `Over { won: false }` and one already holding
    /// `win_value` starts `Over { won: true }`.
    #[must_use]
    pub fn from_board(config: GameConfig, board: Board) -> Self {
        let rng = GameRng::new(config.seed);
        let mut game = Self::blank(config, rng);
        game.generation = 1;
        game.board = board;
        game.evaluate();
        game
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        config: GameConfig,
        board: Board,
        rng: GameRng,
        phase: Phase,
        score: u64,
        generation: u64,
        telemetry: Telemetry,
        agent: AgentKind,
    ) -> Self {
        let mut game = Self::blank(config, rng);
        game.max_tile = board.max_value();
        game.board = board;
        game.phase = phase;
        game.score = score;
        game.generation = generation;
        game.telemetry = telemetry;
        game.agent = agent;
        match phase {
            Phase::Locked => game.schedule_spawn(),
            Phase::Ready => game.evaluate(),
            Phase::Over { .. } => {}
        }
        game
    }

    // === Commands ===

    /// Clear the board, reset score and statistics, and seed the initial
    /// tiles. Any spawn still pending from before is invalidated.
    ///
    /// The agent kind is kept.
    pub fn restart(&mut self) {
        self.generation += 1;
        self.board = self.board.cleared();
        self.phase = Phase::Ready;
        self.score = 0;
        self.max_tile = 0;
        self.telemetry = Telemetry::new();
        self.events.push_back(GameEvent::Restarted {
            generation: self.generation,
        });
        log::info!("restart: generation {}", self.generation);

        for _ in 0..self.config.initial_tiles {
            self.place_tile();
        }
        self.max_tile = self.board.max_value();
    }

    /// Apply a move with no rationale attached.
    pub fn request_move(&mut self, direction: Direction) -> MoveOutcome {
        self.request_move_with_reason(direction, None)
    }

    /// Apply a move, recording `reason` (an advisor rationale) on success.
    pub fn request_move_with_reason(
        &mut self,
        direction: Direction,
        reason: Option<&str>,
    ) -> MoveOutcome {
        let rejected = match self.phase {
            Phase::Ready => None,
            Phase::Locked => Some(RejectReason::Locked),
            Phase::Over { .. } => Some(RejectReason::Over),
        };
        if let Some(reason) = rejected {
            log::debug!("move {direction} aborted: {reason}");
            self.events.push_back(GameEvent::MoveRejected { direction, reason });
            return MoveOutcome::Rejected(reason);
        }

        match shift(&self.board, direction) {
            ShiftOutcome::NoMove => {
                log::debug!("move {direction} moved nothing");
                self.telemetry.record_bad_move(direction);
                self.events.push_back(GameEvent::MoveRejected {
                    direction,
                    reason: RejectReason::NoMove,
                });
                MoveOutcome::NoMove
            }
            ShiftOutcome::Moved(shifted) => {
                let score_delta = shifted.score_delta();
                self.score += score_delta;
                self.telemetry.record_move(reason);
                for merge in &shifted.merges {
                    self.events.push_back(GameEvent::TilesMerged {
                        survivor: merge.survivor,
                        consumed: merge.consumed,
                        value: merge.value,
                        position: merge.position,
                    });
                }
                self.board = shifted.board;
                self.phase = Phase::Locked;
                self.schedule_spawn();
                log::debug!(
                    "move {direction}: {} merges, +{score_delta} (score {})",
                    shifted.merges.len(),
                    self.score
                );
                MoveOutcome::Applied {
                    score_delta,
                    merges: shifted.merges,
                }
            }
        }
    }

    /// Change where moves come from.
    pub fn set_agent(&mut self, agent: AgentKind) {
        if agent != self.agent {
            log::info!("agent: {} -> {}", self.agent, agent);
            self.agent = agent.clone();
            self.events.push_back(GameEvent::AgentChanged { agent });
        }
    }

    /// Move the virtual clock forward and fire every spawn that came due,
    /// in scheduling order. Returns how many spawns landed.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.clock += elapsed;
        let mut landed = 0;
        while let Some(next) = self.pending.front().copied() {
            if next.due > self.clock {
                break;
            }
            self.pending.pop_front();
            if self.fire(next) {
                landed += 1;
            }
        }
        landed
    }

    /// Fire every pending spawn now, moving the clock to the last due time.
    pub fn settle(&mut self) -> usize {
        let wait = self
            .pending
            .back()
            .map_or(Duration::ZERO, |p| p.due.saturating_sub(self.clock));
        self.advance(wait)
    }

    /// Take every event queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The board as a value matrix.
    #[must_use]
    pub fn board_matrix(&self) -> BoardMatrix {
        self.board.to_matrix()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Largest live tile, recomputed after every spawn.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.max_tile
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.phase == Phase::Locked
    }

    /// `Some(won)` once the game is over, `None` while in progress.
    #[must_use]
    pub fn won(&self) -> Option<bool> {
        match self.phase {
            Phase::Over { won } => Some(won),
            _ => None,
        }
    }

    /// Incremented by every restart.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current virtual time.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Spawns scheduled but not yet fired, stale ones included.
    #[must_use]
    pub fn pending_spawns(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    #[must_use]
    pub fn agent(&self) -> &AgentKind {
        &self.agent
    }

    pub(crate) fn rng(&self) -> &GameRng {
        &self.rng
    }

    // === Internals ===

    fn schedule_spawn(&mut self) {
        self.pending.push_back(PendingSpawn {
            generation: self.generation,
            due: self.clock + self.config.spawn_delay,
        });
    }

    /// Returns false if the spawn belonged to an earlier generation.
    fn fire(&mut self, spawn: PendingSpawn) -> bool {
        if spawn.generation != self.generation {
            log::debug!(
                "dropping stale spawn from generation {} (now {})",
                spawn.generation,
                self.generation
            );
            return false;
        }
        self.place_tile();
        self.evaluate();
        true
    }

    fn place_tile(&mut self) {
        let (board, tile) = spawn_tile(&self.board, &mut self.rng, self.config.four_probability);
        self.board = board;
        if let Some(tile) = tile {
            self.events.push_back(GameEvent::TileSpawned { tile });
        }
    }

    fn evaluate(&mut self) {
        self.max_tile = self.board.max_value();
        let phase = if self.max_tile >= self.config.win_value {
            Phase::Over { won: true }
        } else if self.board.is_full() && !has_valid_move(&self.board) {
            Phase::Over { won: false }
        } else {
            Phase::Ready
        };

        if let Phase::Over { won } = phase {
            log::info!(
                "game over ({}): score {}, max tile {}",
                if won { "won" } else { "lost" },
                self.score,
                self.max_tile
            );
            self.events.push_back(GameEvent::GameOver { won });
        }
        self.phase = phase;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
