//! Product Model

use super::{Entity, EntityState};
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    /// Internal SKU / barcode
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Category reference (required)
    #[serde(alias = "categoryId")]
    pub category_id: i64,
    #[serde(default, alias = "brandId")]
    pub brand_id: Option<i64>,
    #[serde(default, alias = "colorId")]
    pub color_id: Option<i64>,
    #[serde(default, alias = "supplierId")]
    pub supplier_id: Option<i64>,
    /// Price list entries (retail, wholesale, ...)
    #[serde(default)]
    pub prices: Vec<ProductPrice>,
    #[serde(default)]
    pub state: EntityState,
}

impl Product {
    /// Price for the named list, if the product has one.
    pub fn price_for(&self, list_name: &str) -> Option<f64> {
        self.prices
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(list_name))
            .map(|p| p.price)
    }
}

impl Entity for Product {
    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn state(&self) -> EntityState {
        self.state
    }

    fn set_state(&mut self, state: EntityState) {
        self.state = state;
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.code.to_lowercase().contains(needle)
    }
}

/// One entry of a product's price list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPrice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Price list name
    pub name: String,
    pub price: f64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub prices: Vec<ProductPrice>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    /// Replaces the whole price list when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<ProductPrice>>,
}
