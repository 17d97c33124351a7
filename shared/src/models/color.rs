//! Color Model

use super::EntityState;
use serde::{Deserialize, Serialize};

/// Product color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub id: i64,
    pub name: String,
    /// Display swatch, e.g. "#FF0000"
    #[serde(default, alias = "hexCode")]
    pub hex_code: Option<String>,
    #[serde(default)]
    pub state: EntityState,
}

super::stateful_entity!(Color);

/// Create color payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_code: Option<String>,
}

/// Update color payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_code: Option<String>,
}
