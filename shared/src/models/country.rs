//! Country Model

use super::Entity;
use serde::{Deserialize, Serialize};

/// Country catalog entry (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    /// ISO code, e.g. "PE"
    pub code: String,
}

impl Entity for Country {
    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.code.to_lowercase().contains(needle)
    }
}
