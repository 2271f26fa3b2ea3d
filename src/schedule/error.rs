use std::fmt;

use thiserror::Error;

use super::types::GameId;

/// Which input collection an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Judges,
    Games,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Judges => write!(f, "judges"),
            InputKind::Games => write!(f, "games"),
        }
    }
}

/// Reasons a scheduling run is aborted. The first one hit wins; no partial schedule is kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("No {0} loaded. Load both judges and games before scheduling.")]
    EmptyInput(InputKind),

    #[error("Duplicate id {id} in {kind}. Every record needs a unique id.")]
    DuplicateId { kind: InputKind, id: usize },

    #[error("Not enough judges. At least {required} judges required for games with highest requirement ({available} loaded).")]
    InsufficientJudgePool { required: usize, available: usize },

    #[error("Cannot assign judges to game {position} ({team}). Not enough eligible judges ({eligible} eligible, {needed} needed).")]
    InsufficientEligibleJudges {
        game_id: GameId,
        position: usize, // 1-based place of the game in the input
        team: String,
        eligible: usize,
        needed: usize,
    },
}
