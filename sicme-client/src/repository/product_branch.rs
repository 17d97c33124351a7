//! Branch-scoped product stock

use crate::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::list::PageFetcher;
use async_trait::async_trait;
use shared::PaginatedResponse;
use shared::models::{BranchProductFilters, ProductBranch, UpdateStockDto};
use std::sync::Arc;

/// Stock listing and updates for products at a branch
pub struct ProductBranchRepository<H: HttpClient = NetworkHttpClient> {
    http: Arc<H>,
}

impl<H: HttpClient> ProductBranchRepository<H> {
    pub fn new(http: Arc<H>) -> Self {
        Self { http }
    }

    /// `GET /branches/:id/products`, one page at a time
    ///
    /// Unset filters are left out of the query string.
    pub async fn list_branch_products(
        &self,
        branch_id: i64,
        filters: &BranchProductFilters,
        page: u32,
        limit: u32,
    ) -> ClientResult<PaginatedResponse<ProductBranch>> {
        let query = stock_query(filters, page, limit);
        tracing::debug!(branch_id, page, limit, "Listing branch products");
        self.http
            .get_query(&format!("branches/{branch_id}/products"), &query)
            .await
    }

    /// `PUT /products/:productId/branches/:branchId/stock`
    pub async fn update_stock(
        &self,
        product_id: i64,
        branch_id: i64,
        data: &UpdateStockDto,
    ) -> ClientResult<ProductBranch> {
        self.http
            .put(
                &format!("products/{product_id}/branches/{branch_id}/stock"),
                data,
            )
            .await
    }

    /// Page fetcher bound to one branch, for server-side pagination
    pub fn fetcher(&self, branch_id: i64) -> BranchStockFetcher<H> {
        BranchStockFetcher {
            repository: self.clone(),
            branch_id,
        }
    }
}

impl<H: HttpClient> Clone for ProductBranchRepository<H> {
    fn clone(&self) -> Self {
        Self::new(self.http.clone())
    }
}

fn stock_query(filters: &BranchProductFilters, page: u32, limit: u32) -> Vec<(&'static str, String)> {
    let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
    if let Some(search) = filters.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        query.push(("search", search.to_string()));
    }
    if let Some(only_available) = filters.only_available {
        query.push(("onlyAvailable", only_available.to_string()));
    }
    if let Some(category_id) = filters.category_id {
        query.push(("categoryId", category_id.to_string()));
    }
    if let Some(brand_id) = filters.brand_id {
        query.push(("brandId", brand_id.to_string()));
    }
    query
}

/// [`PageFetcher`] listing the stock of a single branch
pub struct BranchStockFetcher<H: HttpClient = NetworkHttpClient> {
    repository: ProductBranchRepository<H>,
    branch_id: i64,
}

impl<H: HttpClient> BranchStockFetcher<H> {
    pub fn branch_id(&self) -> i64 {
        self.branch_id
    }
}

#[async_trait]
impl<H: HttpClient> PageFetcher<ProductBranch, BranchProductFilters> for BranchStockFetcher<H> {
    async fn fetch_page(
        &self,
        filters: &BranchProductFilters,
        page: u32,
        limit: u32,
    ) -> ClientResult<PaginatedResponse<ProductBranch>> {
        self.repository
            .list_branch_products(self.branch_id, filters, page, limit)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_query_omits_unset_filters() {
        let filters = BranchProductFilters {
            search: Some("  ".to_string()),
            category_id: Some(4),
            ..Default::default()
        };
        let query = stock_query(&filters, 2, 25);
        assert_eq!(
            query,
            vec![
                ("page", "2".to_string()),
                ("limit", "25".to_string()),
                ("categoryId", "4".to_string()),
            ]
        );
    }

    #[test]
    fn test_stock_query_all_filters() {
        let filters = BranchProductFilters {
            search: Some("polo".to_string()),
            only_available: Some(true),
            category_id: Some(1),
            brand_id: Some(9),
        };
        let keys: Vec<&str> = stock_query(&filters, 1, 50).iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["page", "limit", "search", "onlyAvailable", "categoryId", "brandId"]
        );
    }
}
