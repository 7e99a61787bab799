//! Paginated aggregation-filter engine
//!
//! The upstream lists records in fixed-size pages and knows nothing about
//! the caller's filters or page size. This engine fetches successive pages,
//! filters them client-side, and accumulates matches until the caller's
//! target is covered or the upstream is exhausted. One engine serves every
//! entity type; the per-entity differences live in the static filter table.

use crate::source::CatalogSource;
use holonet_core::{CatalogRecord, Entity, FilterSet};

/// Fetch, filter, and accumulate until `target_count` matches exist or the
/// upstream runs out.
///
/// `target_count` must be the caller's `page * limit` so that every page up
/// to the requested one is covered by the accumulated buffer.
///
/// Failure policy: an upstream error mid-run is logged and the records
/// accumulated so far are returned as a partial result. List callers get
/// best-effort data, never an error, for mid-pagination flakiness.
pub async fn aggregate(
    source: &dyn CatalogSource,
    entity: Entity,
    filters: &FilterSet,
    search: Option<&str>,
    target_count: usize,
) -> Vec<CatalogRecord> {
    if target_count == 0 {
        return Vec::new();
    }

    let page_size = source.page_size().max(1) as u64;
    let mut accumulated: Vec<CatalogRecord> = Vec::new();
    let mut page: u32 = 1;
    let mut total_pages: Option<u64> = None;

    loop {
        if accumulated.len() >= target_count {
            break;
        }
        if let Some(total) = total_pages {
            if u64::from(page) > total {
                break;
            }
        }

        let upstream_page = match source.fetch_page(entity, page, search).await {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(
                    entity = %entity,
                    page,
                    error = %err,
                    "Upstream fetch failed mid-aggregation, returning partial result"
                );
                break;
            }
        };

        // The total count is authoritative only on the first page of a run.
        let total = *total_pages.get_or_insert_with(|| upstream_page.count.div_ceil(page_size));

        if upstream_page.items.is_empty() {
            break;
        }

        let has_next = upstream_page.has_next;
        accumulated.extend(filters.apply(upstream_page.items));

        let need_more = accumulated.len() < target_count;
        let more_pages = u64::from(page) < total && has_next;
        if !(need_more && more_pages) {
            break;
        }
        page += 1;
    }

    accumulated
}
