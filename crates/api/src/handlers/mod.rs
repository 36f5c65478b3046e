//! HTTP handlers, grouped by resource.

pub mod approval;
pub mod directory;
pub mod draft;
pub mod submission;
pub mod subscription;
