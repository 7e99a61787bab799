//! Reqwest client for the upstream catalog service

use crate::source::CatalogSource;
use async_trait::async_trait;
use holonet_core::{CatalogRecord, Entity, UpstreamError, UpstreamPage};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Default upstream page size. The observed upstream always returns 10
/// records per list page; override via `with_page_size` if it ever changes.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default per-request timeout for upstream calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire shape of an upstream list response.
#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<CatalogRecord>,
    count: u64,
    next: Option<String>,
}

/// HTTP client for the SWAPI-style upstream catalog.
pub struct SwapiClient {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl SwapiClient {
    /// Create a client for the given base URL (e.g. `https://swapi.dev/api`).
    ///
    /// The per-request timeout bounds each page fetch; a timed-out page is
    /// reported as `UpstreamError::Timeout` and handled by the engine's
    /// partial-result policy.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            UpstreamError::Transport {
                resource: "catalog".to_string(),
                message: format!("Failed to build HTTP client: {}", e),
            }
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Override the upstream page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn list_request(&self, entity: Entity, page: u32, search: Option<&str>) -> reqwest::RequestBuilder {
        let url = format!("{}/{}/", self.base_url, entity.resource());
        let mut request = self.client.get(url).query(&[("page", page)]);
        if let Some(term) = search {
            if !term.is_empty() {
                request = request.query(&[("search", term)]);
            }
        }
        request
    }

    fn map_transport_error(entity: Entity, err: reqwest::Error) -> UpstreamError {
        let resource = entity.resource().to_string();
        if err.is_timeout() {
            UpstreamError::Timeout { resource }
        } else {
            UpstreamError::Transport {
                resource,
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl CatalogSource for SwapiClient {
    async fn fetch_page(
        &self,
        entity: Entity,
        page: u32,
        search: Option<&str>,
    ) -> Result<UpstreamPage, UpstreamError> {
        let request = self
            .list_request(entity, page, search)
            .build()
            .map_err(|e| Self::map_transport_error(entity, e))?;
        tracing::debug!(url = %request.url(), "Fetching upstream page");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| Self::map_transport_error(entity, e))?;

        let status = response.status();
        if !status.is_success() {
            // The upstream reports a past-the-end page as 404; surface it as
            // an empty terminal page rather than an error.
            if status == StatusCode::NOT_FOUND && page > 1 {
                return Ok(UpstreamPage::empty());
            }
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::RequestFailed {
                resource: entity.resource().to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body: ListResponse =
            response
                .json()
                .await
                .map_err(|e| UpstreamError::InvalidResponse {
                    resource: entity.resource().to_string(),
                    reason: format!("Failed to parse list response: {}", e),
                })?;

        Ok(UpstreamPage {
            items: body.results,
            count: body.count,
            has_next: body.next.is_some(),
        })
    }

    async fn fetch_by_id(
        &self,
        entity: Entity,
        id: &str,
    ) -> Result<CatalogRecord, UpstreamError> {
        let url = format!("{}/{}/{}/", self.base_url, entity.resource(), id);
        tracing::debug!(%url, "Fetching upstream record");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(entity, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound {
                resource: entity.resource().to_string(),
                id: id.to_string(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::RequestFailed {
                resource: entity.resource().to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let record: CatalogRecord =
            response
                .json()
                .await
                .map_err(|e| UpstreamError::InvalidResponse {
                    resource: entity.resource().to_string(),
                    reason: format!("Failed to parse record: {}", e),
                })?;

        Ok(record.with_id(id))
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl std::fmt::Debug for SwapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapiClient")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .finish()
    }
}
