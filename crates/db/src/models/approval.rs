//! Cost-center approval ticket models.

use serde::Serialize;
use sqlx::FromRow;

use ssp_core::types::{DbId, ReviewDate, Timestamp};

/// A row from the `cost_center_approvals` table.
///
/// Denormalized snapshot of the subscription at submission time; not a live
/// join against the platform table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CostCenterApproval {
    pub id: DbId,
    pub platform: String,
    pub subscription_id: String,
    pub name: Option<String>,
    pub management_group: Option<String>,
    pub old_cost_center: Option<String>,
    pub old_cost_center_responsible: Option<String>,
    pub new_cost_center: String,
    pub new_cost_center_responsible: String,
    pub new_cost_center_name: Option<String>,
    pub it_owner: Option<String>,
    pub last_review_date: ReviewDate,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values for creating or refreshing a Pending approval ticket.
#[derive(Debug, Clone)]
pub struct NewApproval {
    pub platform: String,
    pub subscription_id: String,
    pub name: Option<String>,
    pub management_group: Option<String>,
    pub old_cost_center: Option<String>,
    pub old_cost_center_responsible: Option<String>,
    pub new_cost_center: String,
    pub new_cost_center_responsible: String,
    pub new_cost_center_name: Option<String>,
    pub it_owner: Option<String>,
    pub last_review_date: ReviewDate,
}
