//! Error type shared by every progression component.

use std::io;

/// Errors raised by the progression engine and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    /// A caller passed a value outside the documented domain
    /// (negative XP, hour past 23, timestamp in the future, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown character id: {0}")]
    UnknownCharacter(String),

    /// A rule or escalation table has no row that can apply.
    #[error("no applicable rule in policy table")]
    NoApplicableRule,

    #[error("invalid policy table: {0}")]
    InvalidTable(String),

    #[error("storage error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProgressionError>;

impl ProgressionError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        ProgressionError::InvalidInput(msg.into())
    }

    pub(crate) fn invalid_table(msg: impl Into<String>) -> Self {
        ProgressionError::InvalidTable(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ProgressionError::invalid_input("negative xp").to_string(),
            "invalid input: negative xp"
        );
        assert_eq!(
            ProgressionError::UnknownCharacter("bob".to_string()).to_string(),
            "unknown character id: bob"
        );
        assert_eq!(
            ProgressionError::NoApplicableRule.to_string(),
            "no applicable rule in policy table"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let err: ProgressionError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ProgressionError::Io(_)));
    }
}
