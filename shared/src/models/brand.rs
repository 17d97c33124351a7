//! Brand Model

use super::EntityState;
use serde::{Deserialize, Serialize};

/// Product brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub state: EntityState,
}

super::stateful_entity!(Brand);

/// Create brand payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandCreate {
    pub name: String,
}

/// Update brand payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
