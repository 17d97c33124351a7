//! Activation state

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Soft-delete marker.
///
/// The backend stores this as a boolean `state` column (`true` = active);
/// records are deactivated instead of being physically removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum EntityState {
    #[default]
    Active,
    Inactive,
}

impl EntityState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// The opposite state, used by activate/deactivate toggles.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl From<bool> for EntityState {
    fn from(value: bool) -> Self {
        if value { Self::Active } else { Self::Inactive }
    }
}

impl From<EntityState> for bool {
    fn from(value: EntityState) -> Self {
        value.is_active()
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Inactive => f.write_str("inactive"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid entity state: {0} (expected active or inactive)")]
pub struct ParseEntityStateError(String);

impl FromStr for EntityState {
    type Err = ParseEntityStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" | "activo" | "true" | "1" => Ok(Self::Active),
            "inactive" | "inactivo" | "false" | "0" => Ok(Self::Inactive),
            other => Err(ParseEntityStateError(other.to_string())),
        }
    }
}

/// Body of every state-flip endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateStateDto {
    pub state: EntityState,
}

impl UpdateStateDto {
    pub fn new(state: EntityState) -> Self {
        Self { state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_travels_as_boolean() {
        let json = serde_json::to_string(&UpdateStateDto::new(EntityState::Inactive)).unwrap();
        assert_eq!(json, r#"{"state":false}"#);

        let parsed: UpdateStateDto = serde_json::from_str(r#"{"state":true}"#).unwrap();
        assert_eq!(parsed.state, EntityState::Active);
    }

    #[test]
    fn test_parse_state() {
        assert_eq!("Inactive".parse::<EntityState>().unwrap(), EntityState::Inactive);
        assert_eq!("activo".parse::<EntityState>().unwrap(), EntityState::Active);
        assert!("archived".parse::<EntityState>().is_err());
    }

    #[test]
    fn test_toggle() {
        assert_eq!(EntityState::Active.toggled(), EntityState::Inactive);
        assert_eq!(EntityState::Inactive.toggled(), EntityState::Active);
    }
}
