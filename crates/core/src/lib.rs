//! Domain logic for the subscription stewardship portal.
//!
//! Everything in this crate is pure: platform schema mapping, editable-field
//! normalization, the draft staging rules, the submission planner, and the
//! approval state constants. Persistence lives in `ssp-db`, HTTP in `ssp-api`.

pub mod approval;
pub mod costcenter;
pub mod draft;
pub mod error;
pub mod fields;
pub mod platform;
pub mod principal;
pub mod status;
pub mod submit;
pub mod types;
