//! Handlers for the per-subscription draft resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use ssp_core::error::CoreError;
use ssp_core::platform::Platform;
use ssp_db::models::proposal::{DraftInput, ProposedChange};
use ssp_db::repositories::ProposalRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow;

/// PUT /api/v1/subscriptions/{platform}/{id}/draft
pub async fn save(
    State(state): State<AppState>,
    Path((platform, id)): Path<(String, String)>,
    Json(input): Json<DraftInput>,
) -> AppResult<Json<DataResponse<ProposedChange>>> {
    let platform: Platform = platform.parse()?;
    let draft = workflow::save_draft(&state, platform, &id, &input).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// DELETE /api/v1/subscriptions/{platform}/{id}/draft
pub async fn discard(
    State(state): State<AppState>,
    Path((platform, id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let platform: Platform = platform.parse()?;
    let deleted = ProposalRepo::delete(&state.pool, &id, platform).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Draft",
            id,
        }))
    }
}
