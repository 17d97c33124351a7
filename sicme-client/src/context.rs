//! Application context
//!
//! Everything the console needs, built once from a [`ClientConfig`] and
//! passed around explicitly.

use crate::http::NetworkHttpClient;
use crate::repository::{
    AuthRepository, BranchRepository, BrandRepository, CategoryRepository, ColorRepository,
    CountryRepository, ProductBranchRepository, ProductRepository, RouteRepository,
    SupplierRepository, UserRepository,
};
use crate::token::{FileTokenStore, MemoryTokenStore, TokenStore};
use crate::{ClientConfig, ClientResult};
use std::sync::Arc;

/// Shared HTTP client, token store and one repository per resource
pub struct AdminContext {
    config: ClientConfig,
    http: Arc<NetworkHttpClient>,
    token_store: Arc<dyn TokenStore>,
    pub auth: AuthRepository,
    pub users: Arc<UserRepository>,
    pub categories: Arc<CategoryRepository>,
    pub products: Arc<ProductRepository>,
    pub brands: Arc<BrandRepository>,
    pub colors: Arc<ColorRepository>,
    pub suppliers: Arc<SupplierRepository>,
    pub branches: Arc<BranchRepository>,
    pub countries: Arc<CountryRepository>,
    pub routes: Arc<RouteRepository>,
    pub product_branches: ProductBranchRepository,
}

impl AdminContext {
    /// Token persisted at `config.token_path` when set, in memory otherwise
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let token_store: Arc<dyn TokenStore> = match &config.token_path {
            Some(path) => Arc::new(FileTokenStore::new(path.clone())),
            None => Arc::new(MemoryTokenStore::new()),
        };
        Self::with_token_store(config, token_store)
    }

    pub fn with_token_store(config: ClientConfig, token_store: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let http = Arc::new(NetworkHttpClient::new(&config, token_store.clone())?);
        tracing::debug!(base_url = %http.base_url(), "Admin context ready");

        Ok(Self {
            auth: AuthRepository::new(http.clone(), token_store.clone(), config.clone()),
            users: Arc::new(UserRepository::new(http.clone())),
            categories: Arc::new(CategoryRepository::new(http.clone())),
            products: Arc::new(ProductRepository::new(http.clone())),
            brands: Arc::new(BrandRepository::new(http.clone())),
            colors: Arc::new(ColorRepository::new(http.clone())),
            suppliers: Arc::new(SupplierRepository::new(http.clone())),
            branches: Arc::new(BranchRepository::new(http.clone())),
            countries: Arc::new(CountryRepository::countries(http.clone())),
            routes: Arc::new(RouteRepository::routes(http.clone())),
            product_branches: ProductBranchRepository::new(http.clone()),
            config,
            http,
            token_store,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &Arc<NetworkHttpClient> {
        &self.http
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.token_store
    }
}
