use std::sync::Arc;

use ssp_core::costcenter::CostCenterDirectory;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ssp_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cost-center directory used to resolve proposed codes. A trait object
    /// so tests can substitute a stub.
    pub directory: Arc<dyn CostCenterDirectory>,
}
