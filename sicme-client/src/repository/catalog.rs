//! Read-only catalogs (countries, routes)

use crate::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use serde::de::DeserializeOwned;
use shared::models::{Country, Route};
use std::marker::PhantomData;
use std::sync::Arc;

/// Read-only listing used to fill selectors
pub struct CatalogRepository<E, H: HttpClient = NetworkHttpClient> {
    http: Arc<H>,
    path: &'static str,
    _entity: PhantomData<fn() -> E>,
}

pub type CountryRepository<H = NetworkHttpClient> = CatalogRepository<Country, H>;
pub type RouteRepository<H = NetworkHttpClient> = CatalogRepository<Route, H>;

impl<E, H: HttpClient> CatalogRepository<E, H> {
    pub fn new(http: Arc<H>, path: &'static str) -> Self {
        Self {
            http,
            path,
            _entity: PhantomData,
        }
    }
}

impl<H: HttpClient> CatalogRepository<Country, H> {
    pub fn countries(http: Arc<H>) -> Self {
        Self::new(http, "countries")
    }
}

impl<H: HttpClient> CatalogRepository<Route, H> {
    pub fn routes(http: Arc<H>) -> Self {
        Self::new(http, "routes")
    }
}

impl<E: DeserializeOwned + Send, H: HttpClient> CatalogRepository<E, H> {
    pub async fn list(&self) -> ClientResult<Vec<E>> {
        self.http.get(self.path).await
    }

    pub async fn get_by_id(&self, id: i64) -> ClientResult<E> {
        self.http.get(&format!("{}/{}", self.path, id)).await
    }
}

impl<E, H: HttpClient> Clone for CatalogRepository<E, H> {
    fn clone(&self) -> Self {
        Self::new(self.http.clone(), self.path)
    }
}
