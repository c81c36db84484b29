use crate::types::Phase;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("tile id {0} is out of range")]
    UnknownTile(u8),

    #[error("cannot {action} during the {phase} phase")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("the puzzle has not been solved yet")]
    NotSolved,

    #[error("incorrect secret code")]
    WrongCode,
}
