//! REST resources and the generic HTTP repository over them

use super::{CrudOperation, Repository};
use crate::http::{HttpClient, NetworkHttpClient};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use shared::EntityState;
use shared::models::{
    Branch, BranchCreate, BranchUpdate, Brand, BrandCreate, BrandUpdate, Category,
    CategoryCreate, CategoryUpdate, Color, ColorCreate, ColorUpdate, Product, ProductCreate,
    ProductUpdate, Supplier, SupplierCreate, SupplierUpdate, UpdateStateDto, User, UserCreate,
    UserUpdate,
};
use std::marker::PhantomData;
use std::sync::Arc;

/// Verb used for full/partial updates of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMethod {
    Put,
    Patch,
}

/// Where a resource accepts `{ "state": bool }`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRoute {
    /// State cannot be flipped
    None,
    /// `PATCH /<path>/:id`
    Record,
    /// `PATCH /<path>/:id/state`
    StateSuffix,
}

/// Static description of a REST resource
pub trait Resource: Send + Sync + 'static {
    type Entity: DeserializeOwned + Send + Sync;
    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;

    /// Collection path, e.g. "users"
    const PATH: &'static str;
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Put;
    const STATE_ROUTE: StateRoute = StateRoute::None;
    /// Whether `DELETE /<path>/:id` is offered
    const SUPPORTS_DELETE: bool = false;
}

// ============ Resources ============

/// Users: permanent deletion is disabled, deactivation goes through the record
pub struct Users;

impl Resource for Users {
    type Entity = User;
    type Create = UserCreate;
    type Update = UserUpdate;
    const PATH: &'static str = "users";
    const STATE_ROUTE: StateRoute = StateRoute::Record;
}

pub struct Categories;

impl Resource for Categories {
    type Entity = Category;
    type Create = CategoryCreate;
    type Update = CategoryUpdate;
    const PATH: &'static str = "categories";
    const SUPPORTS_DELETE: bool = true;
}

pub struct Products;

impl Resource for Products {
    type Entity = Product;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    const PATH: &'static str = "products";
    const STATE_ROUTE: StateRoute = StateRoute::StateSuffix;
}

pub struct Brands;

impl Resource for Brands {
    type Entity = Brand;
    type Create = BrandCreate;
    type Update = BrandUpdate;
    const PATH: &'static str = "brands";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Patch;
    const STATE_ROUTE: StateRoute = StateRoute::StateSuffix;
}

pub struct Colors;

impl Resource for Colors {
    type Entity = Color;
    type Create = ColorCreate;
    type Update = ColorUpdate;
    const PATH: &'static str = "colors";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Patch;
    const STATE_ROUTE: StateRoute = StateRoute::StateSuffix;
}

pub struct Suppliers;

impl Resource for Suppliers {
    type Entity = Supplier;
    type Create = SupplierCreate;
    type Update = SupplierUpdate;
    const PATH: &'static str = "suppliers";
    const UPDATE_METHOD: UpdateMethod = UpdateMethod::Patch;
    const STATE_ROUTE: StateRoute = StateRoute::StateSuffix;
}

pub struct Branches;

impl Resource for Branches {
    type Entity = Branch;
    type Create = BranchCreate;
    type Update = BranchUpdate;
    const PATH: &'static str = "branches";
    const STATE_ROUTE: StateRoute = StateRoute::StateSuffix;
}

pub type UserRepository<H = NetworkHttpClient> = HttpRepository<Users, H>;
pub type CategoryRepository<H = NetworkHttpClient> = HttpRepository<Categories, H>;
pub type ProductRepository<H = NetworkHttpClient> = HttpRepository<Products, H>;
pub type BrandRepository<H = NetworkHttpClient> = HttpRepository<Brands, H>;
pub type ColorRepository<H = NetworkHttpClient> = HttpRepository<Colors, H>;
pub type SupplierRepository<H = NetworkHttpClient> = HttpRepository<Suppliers, H>;
pub type BranchRepository<H = NetworkHttpClient> = HttpRepository<Branches, H>;

// ============ Repository ============

/// [`Repository`] over any [`Resource`]
pub struct HttpRepository<R: Resource, H: HttpClient = NetworkHttpClient> {
    http: Arc<H>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource, H: HttpClient> HttpRepository<R, H> {
    pub fn new(http: Arc<H>) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    fn record_path(id: i64) -> String {
        format!("{}/{}", R::PATH, id)
    }
}

impl<R: Resource, H: HttpClient> Clone for HttpRepository<R, H> {
    fn clone(&self) -> Self {
        Self::new(self.http.clone())
    }
}

#[async_trait]
impl<R: Resource, H: HttpClient> Repository for HttpRepository<R, H> {
    type Entity = R::Entity;
    type Create = R::Create;
    type Update = R::Update;

    async fn list(&self) -> ClientResult<Vec<R::Entity>> {
        self.http.get(R::PATH).await
    }

    async fn get_by_id(&self, id: i64) -> ClientResult<R::Entity> {
        self.http.get(&Self::record_path(id)).await
    }

    async fn create(&self, data: &R::Create) -> ClientResult<R::Entity> {
        self.http.post(R::PATH, data).await
    }

    async fn update(&self, id: i64, data: &R::Update) -> ClientResult<R::Entity> {
        let path = Self::record_path(id);
        match R::UPDATE_METHOD {
            UpdateMethod::Put => self.http.put(&path, data).await,
            UpdateMethod::Patch => self.http.patch(&path, data).await,
        }
    }

    fn supports(&self, op: CrudOperation) -> bool {
        match op {
            CrudOperation::UpdateState => R::STATE_ROUTE != StateRoute::None,
            CrudOperation::Delete => R::SUPPORTS_DELETE,
            _ => true,
        }
    }

    async fn update_state(&self, id: i64, state: EntityState) -> ClientResult<R::Entity> {
        let body = UpdateStateDto::new(state);
        match R::STATE_ROUTE {
            StateRoute::None => Err(ClientError::NotSupported(format!(
                "{} has no state endpoint",
                R::PATH
            ))),
            StateRoute::Record => self.http.patch(&Self::record_path(id), &body).await,
            StateRoute::StateSuffix => {
                let path = format!("{}/state", Self::record_path(id));
                self.http.patch(&path, &body).await
            }
        }
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        if !R::SUPPORTS_DELETE {
            return Err(ClientError::NotSupported(format!(
                "{} cannot be deleted",
                R::PATH
            )));
        }
        self.http
            .delete::<IgnoredAny>(&Self::record_path(id))
            .await?;
        Ok(())
    }
}
