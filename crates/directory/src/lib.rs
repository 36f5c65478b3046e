//! HTTP client for the corporate cost-center directory.
//!
//! Implements [`ssp_core::costcenter::CostCenterDirectory`] against the
//! controlling master-data OData endpoint.

mod client;

pub use client::{DirectoryApiError, DirectoryClient};
