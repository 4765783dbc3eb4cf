use thiserror::Error;

/// Errors surfaced at the engine boundary.
///
/// Street-level dead ends (too few live players, no wager to ask about) are
/// not errors: the street simulators return `None` and the orchestrator moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
    #[error("Unknown difficulty '{0}' (expected easy, medium or advanced)")]
    UnknownDifficulty(String),

    #[error("Invalid blind level {0}: must be a positive big-blind amount")]
    InvalidBlindLevel(u32),

    #[error("Unsupported blind level {level}; supported levels: {supported:?}")]
    UnsupportedBlindLevel { level: u32, supported: Vec<u32> },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type DrillResult<T> = Result<T, DrillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DrillError::UnsupportedBlindLevel { level: 3, supported: vec![2, 5] };
        assert_eq!(err.to_string(), "Unsupported blind level 3; supported levels: [2, 5]");
        assert_eq!(
            DrillError::InvalidBlindLevel(0).to_string(),
            "Invalid blind level 0: must be a positive big-blind amount"
        );
    }
}
