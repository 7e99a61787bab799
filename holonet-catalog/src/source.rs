//! Catalog source trait
//!
//! The aggregation engine and the route handlers only see this trait, so
//! tests can substitute scripted sources and the HTTP client stays an
//! external collaborator.

use async_trait::async_trait;
use holonet_core::{CatalogRecord, Entity, UpstreamError, UpstreamPage};

/// An upstream catalog service: page-at-a-time listing plus per-id lookup.
///
/// Implementations must be thread-safe (Send + Sync). Pages are fetched one
/// at a time, never in parallel; the engine decides when to stop.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one upstream page, optionally scoped by a server-side search
    /// term. `page` is 1-based.
    async fn fetch_page(
        &self,
        entity: Entity,
        page: u32,
        search: Option<&str>,
    ) -> Result<UpstreamPage, UpstreamError>;

    /// Fetch a single record by its upstream id, with the id attached.
    async fn fetch_by_id(&self, entity: Entity, id: &str)
        -> Result<CatalogRecord, UpstreamError>;

    /// The upstream's fixed page size.
    fn page_size(&self) -> u32;
}
