//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//!   (subscriptions are read through a logical-column alias, so one struct
//!   covers all three platform tables)
//! - `Deserialize` DTOs for the write paths

pub mod approval;
pub mod proposal;
pub mod subscription;
