//! Holonet Core - Shared Data Model
//!
//! Data types shared by every layer of the gateway: catalog records and
//! upstream pages, filter sets with per-entity match modes, re-pagination,
//! chat turns, and the error taxonomy.

pub mod chat;
pub mod entity;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod record;

pub use chat::{ChatTurn, Role};
pub use entity::Entity;
pub use error::{ChatError, ConfigError, UpstreamError};
pub use filter::{FieldFilter, FilterSet, MatchMode};
pub use pagination::{paginate, PageMeta, PageView};
pub use record::{CatalogRecord, UpstreamPage};
