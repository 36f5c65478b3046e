//! Handlers for the approval gate: the review inbox and ticket resolution.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use ssp_core::approval::ResolveAction;
use ssp_core::platform::Platform;
use ssp_db::models::approval::CostCenterApproval;
use ssp_db::repositories::ApprovalRepo;

use crate::auth::PortalUser;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;

/// GET /api/v1/approvals
///
/// Tickets addressed to the caller as the incoming cost-center responsible,
/// newest review date first. Includes resolved tickets as history.
pub async fn inbox(
    State(state): State<AppState>,
    user: PortalUser,
) -> AppResult<Json<DataResponse<Vec<CostCenterApproval>>>> {
    let tickets = ApprovalRepo::list_for_responsible(&state.pool, user.emails()).await?;
    Ok(Json(DataResponse { data: tickets }))
}

#[derive(Debug, Deserialize)]
pub struct ResolutionInput {
    /// `"approve"` or `"reject"`.
    pub action: String,
}

/// POST /api/v1/subscriptions/{platform}/{id}/resolution
pub async fn resolve(
    State(state): State<AppState>,
    Path((platform, id)): Path<(String, String)>,
    Json(input): Json<ResolutionInput>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let platform: Platform = platform.parse()?;
    let action: ResolveAction = input.action.parse()?;
    workflow::resolve_approval(&state, platform, &id, action).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "status": action.resulting_status() }),
    }))
}
