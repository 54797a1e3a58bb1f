//! Turn sequencing on top of the grid engine.
//!
//! - `Game`: owns a board and drives the Ready / Locked / Over state machine
//! - `GameEvent`: what happened, for a presentation layer
//! - `Telemetry`: move counters and advisor rationales
//! - `GameSnapshot`: serializable copy of a game

mod controller;
mod event;
mod snapshot;
mod telemetry;

pub use controller::{Game, MoveOutcome, Phase};
pub use event::{GameEvent, RejectReason};
pub use snapshot::GameSnapshot;
pub use telemetry::{Telemetry, MAX_REASONS, NO_REASON};
