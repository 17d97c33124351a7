//! SICME Client - REST client and list substrate for the SICME admin console
//!
//! Provides bearer-token HTTP calls to the SICME API, one repository per
//! resource, and the generic list-management building blocks every entity
//! screen is assembled from.

pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod list;
pub mod repository;
pub mod token;

pub use config::ClientConfig;
pub use context::AdminContext;
pub use error::{ClientError, ClientResult, ErrorInfo, extract_error_message};
pub use http::{HttpClient, NetworkHttpClient};
pub use repository::{CrudOperation, Repository};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};

// Re-export shared types for convenience
pub use shared::client::{CurrentUserResponse, LoginRequest, LoginResponse};
pub use shared::{Entity, EntityState, PaginatedResponse};
