//! Pagination options shared by list queries.

use serde::{Deserialize, Serialize};

/// Default page size used by the catalog listing.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 25;

/// 1-based page selection applied to a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Requested page, starting at 1.
    pub page: usize,
    /// Number of records per page.
    pub per_page: usize,
}
