//! Shared types for the SICME admin client
//!
//! Entity records mirrored from the backend, the per-operation DTOs sent
//! to it, and the response envelopes it returns.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use models::{Entity, EntityState};
pub use response::PaginatedResponse;
pub use serde::{Deserialize, Serialize};
