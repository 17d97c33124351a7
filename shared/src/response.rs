//! Response envelopes
//!
//! Plain resource endpoints return the JSON record (or array) directly;
//! only the paginated listings wrap their rows.

use serde::{Deserialize, Serialize};

/// One page of a server-paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Rows of the requested page
    pub data: Vec<T>,
    /// Total number of rows matching the filters
    pub total: u64,
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u32,
    /// Page size the server applied
    #[serde(default)]
    pub limit: u32,
    /// Total number of pages
    #[serde(alias = "totalPages")]
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
        } else {
            1
        };

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}
