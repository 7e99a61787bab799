//! Holonet Catalog - Upstream Client and Aggregation Engine
//!
//! Talks to the upstream catalog service and drives the fetch/filter/
//! accumulate loop that powers every list endpoint.

pub mod client;
pub mod engine;
pub mod source;

pub use client::SwapiClient;
pub use engine::aggregate;
pub use source::CatalogSource;
