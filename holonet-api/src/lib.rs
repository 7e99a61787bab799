//! Holonet API - HTTP surface for the catalog gateway
//!
//! Entity list/lookup routes, the character chat route, health checks,
//! error mapping, configuration, and shared state.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use state::AppState;
