//! Re-pagination of filtered, accumulated result sets
//!
//! The upstream knows nothing about the caller's filters or page size, so
//! the engine over-fetches to `page * limit` matches and this layer slices
//! the accumulated buffer into the caller's page. Totals describe the
//! filtered set, never the upstream's raw count.

use crate::record::CatalogRecord;
use serde::{Deserialize, Serialize};

/// Pagination metadata computed from the filtered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub limit: usize,
}

/// One page of results plus its metadata, as served to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub data: Vec<CatalogRecord>,
    pub meta: PageMeta,
}

/// Slice an accumulated result buffer into the requested page.
///
/// `page` and `limit` must both be >= 1 (validated at the API boundary).
/// A short last page or an empty page beyond the buffer is not an error.
pub fn paginate(results: Vec<CatalogRecord>, page: usize, limit: usize) -> PageView {
    let total = results.len();
    let total_pages = total.div_ceil(limit);

    let start = (page - 1).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);
    let data = results[start..end].to_vec();

    PageView {
        data,
        meta: PageMeta {
            total,
            current_page: page,
            total_pages,
            limit,
        },
    }
}
