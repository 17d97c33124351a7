//! Data models
//!
//! Flat records mirrored from the SICME backend. The backend is the system
//! of record; relations are plain foreign-key ids and nothing here enforces
//! them. All IDs are `i64`.

pub mod branch;
pub mod brand;
pub mod category;
pub mod color;
pub mod country;
pub mod product;
pub mod product_branch;
pub mod route;
pub mod state;
pub mod supplier;
pub mod user;

// Re-exports
pub use branch::*;
pub use brand::*;
pub use category::*;
pub use color::*;
pub use country::*;
pub use product::*;
pub use product_branch::*;
pub use route::*;
pub use state::*;
pub use supplier::*;
pub use user::*;

/// Common surface of every backend entity held in a client-side list.
pub trait Entity {
    /// Backend identifier
    fn id(&self) -> i64;

    /// Human readable name used in lists and confirmation prompts
    fn label(&self) -> &str;

    /// Activation state. Records without a state flag are always active.
    fn state(&self) -> EntityState {
        EntityState::Active
    }

    /// Overwrite the activation state after a successful state flip.
    fn set_state(&mut self, _state: EntityState) {}

    /// Case-insensitive search over the fields a list screen filters on.
    ///
    /// `needle` is expected to be lowercased already.
    fn matches_search(&self, needle: &str) -> bool {
        self.label().to_lowercase().contains(needle)
    }
}

/// Implements [`Entity`] for a record with `id`, `name` and `state` fields.
macro_rules! stateful_entity {
    ($ty:ty) => {
        impl $crate::models::Entity for $ty {
            fn id(&self) -> i64 {
                self.id
            }

            fn label(&self) -> &str {
                &self.name
            }

            fn state(&self) -> $crate::models::EntityState {
                self.state
            }

            fn set_state(&mut self, state: $crate::models::EntityState) {
                self.state = state;
            }
        }
    };
}

pub(crate) use stateful_entity;
