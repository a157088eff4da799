//! Error types surfaced at the core boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{GameId, Stage};

/// Errors raised by the session store and the game service.
///
/// Adapters should branch on [`GameError::kind`] rather than on
/// individual variants: only the two kinds are stable.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("game {0} does not exist")]
    NotFound(GameId),
    #[error("expected the {expected} stage, but the game is at {actual}")]
    WrongStage { expected: Stage, actual: Stage },
    #[error("need 2+ players to deal the cards, game has {have}")]
    NotEnoughPlayers { have: usize },
    #[error("game is full")]
    GameFull,
}

/// Coarse classification of a [`GameError`] for transport mapping.
/// Exactly these two kinds cross the core boundary; neither is
/// transient, so no failure is ever worth retrying.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GameErrorKind {
    /// The id names no stored session.
    NotFound,
    /// A precondition on the session's stage or players was violated.
    InvalidStage,
}

impl GameError {
    #[must_use]
    pub const fn kind(&self) -> GameErrorKind {
        match self {
            Self::NotFound(_) => GameErrorKind::NotFound,
            Self::WrongStage { .. } | Self::NotEnoughPlayers { .. } | Self::GameFull => {
                GameErrorKind::InvalidStage
            }
        }
    }
}
