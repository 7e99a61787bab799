//! Catalog entity routes
//!
//! One generic pair of handlers serves every entity type; the path segment
//! selects the entity and its filter table. Listing over-fetches upstream
//! to `page * limit` filtered matches, then re-paginates the accumulated
//! buffer to the caller's window.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use holonet_catalog::aggregate;
use holonet_core::{paginate, CatalogRecord, Entity, PageView};

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::AppState;

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

/// GET /{entity} - filtered, re-paginated list.
pub async fn list(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<PageView>> {
    let entity = parse_entity(&entity)?;
    let page = parse_positive(&params, "page", DEFAULT_PAGE)?;
    let limit = parse_positive(&params, "limit", DEFAULT_LIMIT)?;
    let search = params.get("search").map(String::as_str);

    let filters = entity.filter_set(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    // Enough filtered matches to fill every page up to the requested one.
    let target_count = page.saturating_mul(limit);
    let results = aggregate(&*state.catalog, entity, &filters, search, target_count).await;

    Ok(Json(paginate(results, page, limit)))
}

/// GET /{entity}/{id} - single record lookup.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, String)>,
) -> ApiResult<Json<CatalogRecord>> {
    let entity = parse_entity(&entity)?;
    let record = state.catalog.fetch_by_id(entity, &id).await?;
    Ok(Json(record))
}

fn parse_entity(segment: &str) -> Result<Entity, ApiError> {
    segment.parse().map_err(|_| {
        ApiError::new(
            ErrorCode::EntityNotFound,
            format!("unknown entity type: {}", segment),
        )
    })
}

/// Parse a pagination parameter. Absent means the default; present means it
/// must be a positive integer.
fn parse_positive(
    params: &HashMap<String, String>,
    key: &str,
    default: usize,
) -> Result<usize, ApiError> {
    match params.get(key) {
        None => Ok(default),
        Some(raw) => match raw.parse::<usize>() {
            Ok(value) if value >= 1 => Ok(value),
            _ => Err(ApiError::invalid_input(format!(
                "{} must be a positive integer, got {:?}",
                key, raw
            ))),
        },
    }
}
