use thiserror::Error;

use crate::models::Position;

#[derive(Error, Debug)]
pub enum LineupError {
    #[error("Invalid inning {inning}: valid range is 1..={innings}")]
    InvalidInning { inning: u8, innings: u8 },

    #[error("Unknown position code: {0}")]
    UnknownPosition(String),

    #[error("Unknown player id: {0}")]
    UnknownPlayer(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("No player at {slot} in inning {inning}")]
    EmptySlot { inning: u8, slot: String },

    #[error("{name} cannot take the pitcher slot in inning {inning}")]
    PitcherRejected { name: String, inning: u8 },

    #[error("{name} is not available in inning {inning}")]
    Unavailable { name: String, inning: u8 },

    #[error("Inning {0} is locked")]
    LockedInning(u8),

    #[error("Batting order rejected: {0}")]
    InvalidBattingOrder(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersionMismatch { found: u8, expected: u8 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LineupError {
    pub(crate) fn empty_slot(inning: u8, position: Option<Position>) -> Self {
        let slot = match position {
            Some(pos) => pos.code().to_string(),
            None => "Bench".to_string(),
        };
        LineupError::EmptySlot { inning, slot }
    }

    /// True for refusals of an otherwise well-formed request (the grid is
    /// left untouched); false for structural errors that indicate a caller
    /// bug.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LineupError::EmptySlot { .. }
                | LineupError::PitcherRejected { .. }
                | LineupError::Unavailable { .. }
                | LineupError::LockedInning(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LineupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_distinct_from_structural_errors() {
        assert!(LineupError::LockedInning(2).is_rejection());
        assert!(LineupError::Unavailable { name: "A".into(), inning: 5 }.is_rejection());
        assert!(!LineupError::InvalidInning { inning: 0, innings: 6 }.is_rejection());
        assert!(!LineupError::UnknownPlayer("x".into()).is_rejection());
    }
}
