//! Handlers for the `/subscriptions` resource: owner-scoped listing and the
//! merged detail view.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use ssp_core::error::CoreError;
use ssp_core::fields::EditableField;
use ssp_core::platform::Platform;
use ssp_core::status::{StatusCounts, SubscriptionStatus};
use ssp_db::models::proposal::ProposedChange;
use ssp_db::models::subscription::Subscription;
use ssp_db::repositories::{ProposalRepo, SubscriptionRepo, SubscriptionStatusRepo};

use crate::auth::PortalUser;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict the listing to one platform; all three when absent.
    pub platform: Option<String>,
}

/// A subscription row with its computed review status.
#[derive(Debug, Serialize)]
pub struct SubscriptionWithStatus {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub status: SubscriptionStatus,
}

/// One platform's slice of the caller's portfolio.
#[derive(Debug, Serialize)]
pub struct PlatformListing {
    pub platform: Platform,
    pub counts: StatusCounts,
    pub subscriptions: Vec<SubscriptionWithStatus>,
}

/// GET /api/v1/subscriptions?platform=
///
/// Subscriptions owned by the caller, as IT owner or cost-center
/// responsible, with per-platform status counts.
pub async fn list(
    State(state): State<AppState>,
    user: PortalUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<DataResponse<Vec<PlatformListing>>>> {
    let platforms: Vec<Platform> = match &query.platform {
        Some(raw) => vec![raw.parse()?],
        None => Platform::ALL.to_vec(),
    };

    let mut listings = Vec::with_capacity(platforms.len());
    for platform in platforms {
        let rows = SubscriptionRepo::list_by_emails(&state.pool, platform, user.emails()).await?;
        let mut subscriptions = Vec::with_capacity(rows.len());
        for row in rows {
            let status = SubscriptionStatusRepo::status(&state.pool, &row.id, platform).await?;
            subscriptions.push(SubscriptionWithStatus {
                subscription: row,
                status,
            });
        }
        let counts = StatusCounts::tally(subscriptions.iter().map(|s| s.status));
        listings.push(PlatformListing {
            platform,
            counts,
            subscriptions,
        });
    }

    Ok(Json(DataResponse { data: listings }))
}

/// Live values overlaid with the draft: a staged proposed value wins over
/// the authoritative one, and the manual cost-center fields win over the
/// live cost-center metadata.
#[derive(Debug, Serialize)]
pub struct EffectiveValues {
    pub i_sc: String,
    pub a_sc: String,
    pub c_sc: String,
    pub organizational_unit: String,
    pub environment: String,
    pub cost_center: String,
    pub it_owner: String,
    pub person_related: String,
    pub cost_center_name: String,
    pub cost_center_responsible: String,
    pub cost_center_responsible_wom: String,
}

/// Detail view: the live row, its status, the draft (when one exists), and
/// the merged field values the edit form shows.
#[derive(Debug, Serialize)]
pub struct SubscriptionDetail {
    pub subscription: Subscription,
    pub status: SubscriptionStatus,
    pub draft: Option<ProposedChange>,
    pub effective: EffectiveValues,
}

fn effective_values(live: &Subscription, draft: Option<&ProposedChange>) -> EffectiveValues {
    let merged = |field: EditableField| {
        let proposed = draft.map(|d| d.proposed(field)).unwrap_or_default();
        if proposed.is_empty() {
            live.field(field).to_string()
        } else {
            proposed.to_string()
        }
    };
    let manual_or_live = |manual: Option<&str>, live_value: Option<&str>| {
        match manual.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) => m.to_string(),
            None => live_value.unwrap_or_default().to_string(),
        }
    };

    EffectiveValues {
        i_sc: merged(EditableField::ISc),
        a_sc: merged(EditableField::ASc),
        c_sc: merged(EditableField::CSc),
        organizational_unit: merged(EditableField::OrganizationalUnit),
        environment: merged(EditableField::Environment),
        cost_center: merged(EditableField::CostCenter),
        it_owner: merged(EditableField::ItOwner),
        person_related: merged(EditableField::PersonRelated),
        cost_center_name: manual_or_live(
            draft.and_then(|d| d.cost_center_name_manual.as_deref()),
            live.cost_center_name.as_deref(),
        ),
        cost_center_responsible: manual_or_live(
            draft.and_then(|d| d.cost_center_responsible_manual.as_deref()),
            live.cost_center_responsible.as_deref(),
        ),
        cost_center_responsible_wom: manual_or_live(
            draft.and_then(|d| d.cost_center_responsible_wom_manual.as_deref()),
            live.cost_center_responsible_wom.as_deref(),
        ),
    }
}

/// GET /api/v1/subscriptions/{platform}/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((platform, id)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<SubscriptionDetail>>> {
    let platform: Platform = platform.parse()?;
    let live = SubscriptionRepo::find_by_id(&state.pool, platform, &id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Subscription",
                id: id.clone(),
            })
        })?;
    let draft = ProposalRepo::find(&state.pool, &id, platform).await?;
    let status = SubscriptionStatusRepo::status(&state.pool, &id, platform).await?;

    let effective = effective_values(&live, draft.as_ref());
    Ok(Json(DataResponse {
        data: SubscriptionDetail {
            subscription: live,
            status,
            draft,
            effective,
        },
    }))
}
