//! Proxy handlers for the cost-center directory and the IT owner reference.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use ssp_core::error::CoreError;
use ssp_db::repositories::ItOwnerReferenceRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CostCenterQuery {
    pub cost_center: String,
}

/// Resolved cost-center metadata in the shape the edit form consumes.
#[derive(Debug, Serialize)]
pub struct CostCenterLookup {
    pub cost_center: String,
    pub name: String,
    pub responsible: String,
    pub responsible_wom: String,
}

/// POST /api/v1/directory/cost-center
///
/// 404 when the directory exhausts its widening retry without a match.
pub async fn lookup_cost_center(
    State(state): State<AppState>,
    Json(query): Json<CostCenterQuery>,
) -> AppResult<Json<DataResponse<CostCenterLookup>>> {
    let code = query.cost_center.trim().to_string();
    if code.is_empty() {
        return Err(AppError::BadRequest("cost_center must not be empty".into()));
    }

    let details = state
        .directory
        .lookup(&code)
        .await
        .map_err(|err| AppError::InternalError(format!("Directory lookup failed: {err}")))?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Cost center",
                id: code,
            })
        })?;

    Ok(Json(DataResponse {
        data: CostCenterLookup {
            cost_center: details.cost_center.clone(),
            name: details.display_name(),
            responsible: details.responsible_email(),
            responsible_wom: details.responsible_org_office.trim().to_string(),
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct ItOwnerQuery {
    pub it_owner: String,
}

#[derive(Debug, Serialize)]
pub struct ItOwnerLookup {
    /// Empty string when the owner is not in the reference table.
    pub it_owner_wom: String,
}

/// POST /api/v1/directory/it-owner
pub async fn lookup_it_owner(
    State(state): State<AppState>,
    Json(query): Json<ItOwnerQuery>,
) -> AppResult<Json<DataResponse<ItOwnerLookup>>> {
    let wom = ItOwnerReferenceRepo::wom_for(&state.pool, query.it_owner.trim())
        .await?
        .unwrap_or_default();
    Ok(Json(DataResponse {
        data: ItOwnerLookup { it_owner_wom: wom },
    }))
}
