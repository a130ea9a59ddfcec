use thiserror::Error;

use crate::models::TeamSide;

/// Errors surfaced by match-day entry points.
///
/// Nothing here is fatal to the enclosing application: every variant is a
/// rejected user action that leaves the match state untouched. Stray clock
/// callbacks (a tick after full time, a resume outside half-time) are not
/// errors at all; they are ignored and logged at debug level.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("substitution cap reached for {side:?}")]
    CapacityExceeded { side: TeamSide },

    #[error("player {name} is not eligible for this swap")]
    IneligiblePlayer { name: String },

    #[error("lineup must fill all pitch and bench slots: expected at least {expected}, found {found}")]
    InvalidLineup { expected: usize, found: usize },

    #[error("objection is not available right now")]
    ObjectionUnavailable,

    #[error("tactics panel is locked")]
    TacticsLocked,

    #[error("match has not reached full time")]
    MatchNotFinished,
}

pub type Result<T> = std::result::Result<T, MatchError>;
