//! Repositories
//!
//! Client-side adapters translating domain operations into HTTP calls.
//! Every entity screen talks to a [`Repository`]; what the backend offers
//! beyond get/create/update is declared through [`Repository::supports`].

mod auth;
mod catalog;
mod product_branch;
mod resource;

pub use auth::AuthRepository;
pub use catalog::{CatalogRepository, CountryRepository, RouteRepository};
pub use product_branch::{BranchStockFetcher, ProductBranchRepository};
pub use resource::{
    BranchRepository, Branches, BrandRepository, Brands, Categories, CategoryRepository,
    ColorRepository, Colors, HttpRepository, ProductRepository, Products, Resource, StateRoute,
    SupplierRepository, Suppliers, UpdateMethod, UserRepository, Users,
};

use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use shared::EntityState;
use std::fmt;

/// Operations the CRUD layer performs on a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrudOperation {
    List,
    GetById,
    Create,
    Update,
    UpdateState,
    Delete,
}

impl CrudOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::GetById => "getById",
            Self::Create => "create",
            Self::Update => "update",
            Self::UpdateState => "updateState",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for CrudOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity repository
///
/// `update_state` and `delete` are optional capabilities: the defaults fail
/// with [`ClientError::NotSupported`] and `supports` reports them as absent.
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: Send + Sync;
    type Create: Send + Sync;
    type Update: Send + Sync;

    async fn list(&self) -> ClientResult<Vec<Self::Entity>>;

    async fn get_by_id(&self, id: i64) -> ClientResult<Self::Entity>;

    async fn create(&self, data: &Self::Create) -> ClientResult<Self::Entity>;

    async fn update(&self, id: i64, data: &Self::Update) -> ClientResult<Self::Entity>;

    /// Whether the repository implements `op`
    fn supports(&self, op: CrudOperation) -> bool {
        !matches!(op, CrudOperation::UpdateState | CrudOperation::Delete)
    }

    async fn update_state(&self, id: i64, state: EntityState) -> ClientResult<Self::Entity> {
        Err(ClientError::NotSupported(format!(
            "updateState({id}, {state})"
        )))
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        Err(ClientError::NotSupported(format!("delete({id})")))
    }
}
