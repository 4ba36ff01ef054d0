use crate::error::ProgressionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The companion character whose voice is used for moods and reminders.
///
/// The persona only changes wording; rule evaluation is identical for all three.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CharacterId {
    /// Gentle, calm listener.
    #[default]
    Luna,
    /// Upbeat coach.
    Max,
    /// Reflective mentor.
    Sage,
}

impl CharacterId {
    pub const ALL: [CharacterId; 3] = [CharacterId::Luna, CharacterId::Max, CharacterId::Sage];

    /// Stable id used in storage and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterId::Luna => "luna",
            CharacterId::Max => "max",
            CharacterId::Sage => "sage",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CharacterId::Luna => "Luna",
            CharacterId::Max => "Max",
            CharacterId::Sage => "Sage",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CharacterId::Luna => "🌙",
            CharacterId::Max => "⚡",
            CharacterId::Sage => "🦉",
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CharacterId {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "luna" => Ok(CharacterId::Luna),
            "max" => Ok(CharacterId::Max),
            "sage" => Ok(CharacterId::Sage),
            _ => Err(ProgressionError::UnknownCharacter(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        assert_eq!("luna".parse::<CharacterId>().unwrap(), CharacterId::Luna);
        assert_eq!("MAX".parse::<CharacterId>().unwrap(), CharacterId::Max);
        assert_eq!(" sage ".parse::<CharacterId>().unwrap(), CharacterId::Sage);
    }

    #[test]
    fn test_parse_unknown_id() {
        let err = "robot".parse::<CharacterId>().unwrap_err();
        assert!(matches!(err, ProgressionError::UnknownCharacter(ref id) if id == "robot"));
    }

    #[test]
    fn test_as_str_roundtrips_through_parse() {
        for id in CharacterId::ALL {
            assert_eq!(id.as_str().parse::<CharacterId>().unwrap(), id);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&CharacterId::Sage).unwrap();
        assert_eq!(json, "\"sage\"");
    }
}
