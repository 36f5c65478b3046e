//! Handler for submitting staged changes.

use axum::extract::{Path, State};
use axum::Json;

use ssp_core::platform::Platform;
use ssp_db::models::proposal::DraftInput;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::{self, SubmitOutcome};

/// POST /api/v1/subscriptions/{platform}/{id}/submit
///
/// The body's field values are only consulted when no draft is stored;
/// a saved draft always wins.
pub async fn submit(
    State(state): State<AppState>,
    Path((platform, id)): Path<(String, String)>,
    Json(input): Json<DraftInput>,
) -> AppResult<Json<DataResponse<SubmitOutcome>>> {
    let platform: Platform = platform.parse()?;
    let outcome = workflow::submit_changes(&state, platform, &id, &input).await?;
    Ok(Json(DataResponse { data: outcome }))
}
