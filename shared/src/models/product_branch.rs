//! Product-branch stock relation

use super::Product;
use serde::{Deserialize, Serialize};

/// Stock of one product at one branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBranch {
    #[serde(alias = "productId")]
    pub product_id: i64,
    #[serde(alias = "branchId")]
    pub branch_id: i64,
    #[serde(alias = "hasStock")]
    pub has_stock: bool,
    #[serde(alias = "stockQty")]
    pub stock_qty: i64,
    /// Product record, when the backend embeds it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

/// Body of `PUT /products/:productId/branches/:branchId/stock`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpdateStockDto {
    pub has_stock: bool,
    pub stock_qty: i64,
}

impl UpdateStockDto {
    /// Stock flag follows the quantity.
    pub fn from_qty(stock_qty: i64) -> Self {
        Self {
            has_stock: stock_qty > 0,
            stock_qty,
        }
    }
}

/// Filters of the branch-scoped product listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchProductFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<i64>,
}
