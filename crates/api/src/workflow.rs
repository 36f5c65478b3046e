//! Orchestration of the save / submit / resolve operations.
//!
//! The pure decision logic lives in `ssp_core` (draft staging and the
//! submission planner); this module loads the inputs, runs the planner, and
//! executes the resulting writes. Submit and Resolve each wrap all of their
//! writes in a single transaction so a failure leaves every store untouched.

use chrono::Utc;
use serde::Serialize;

use ssp_core::approval::ResolveAction;
use ssp_core::draft::stage_draft;
use ssp_core::error::CoreError;
use ssp_core::fields::EditableField;
use ssp_core::platform::Platform;
use ssp_core::submit;

use ssp_db::models::approval::NewApproval;
use ssp_db::models::proposal::{DraftInput, ProposedChange};
use ssp_db::models::subscription::Subscription;
use ssp_db::repositories::{ApprovalRepo, ItOwnerReferenceRepo, ProposalRepo, SubscriptionRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// What a Submit did, reported back to the caller.
#[derive(Debug, Serialize)]
pub struct SubmitOutcome {
    /// Number of columns written to the subscription table.
    pub fields_updated: usize,
    /// Whether a cost-center change was staged for approval.
    pub approval_required: bool,
}

async fn load_subscription(
    state: &AppState,
    platform: Platform,
    id: &str,
) -> AppResult<Subscription> {
    SubscriptionRepo::find_by_id(&state.pool, platform, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Subscription",
                id: id.to_string(),
            })
        })
}

/// Save (or replace) the draft for a subscription.
///
/// Originals are resolved from the live row at save time; the whole draft is
/// written in one atomic upsert.
pub async fn save_draft(
    state: &AppState,
    platform: Platform,
    id: &str,
    input: &DraftInput,
) -> AppResult<ProposedChange> {
    let live = load_subscription(state, platform, id).await?;
    let staged = stage_draft(platform, &live.current_values(), &input.draft_values());
    let draft = ProposalRepo::upsert(&state.pool, id, platform, &staged).await?;
    tracing::info!(%platform, subscription = %id, "Draft saved");
    Ok(draft)
}

/// Submit the staged changes for a subscription.
///
/// Uses the stored draft when one exists, otherwise the request-supplied
/// values. A proposed cost-center change goes through the directory; lookup
/// failure degrades to the manual override and is never fatal. All writes
/// happen in one transaction:
///
/// 1. apply the staged non-cost-center updates (plus the WOM reference for
///    a changed IT owner),
/// 2. stamp `last_review_date` with today, unconditionally,
/// 3. stage or refresh the Pending approval ticket when a cost-center
///    change was planned,
/// 4. consume the draft unless the ticket still needs it.
pub async fn submit_changes(
    state: &AppState,
    platform: Platform,
    id: &str,
    input: &DraftInput,
) -> AppResult<SubmitOutcome> {
    let live = load_subscription(state, platform, id).await?;
    let current = live.current_values();

    let draft = ProposalRepo::find(&state.pool, id, platform).await?;
    let values = draft
        .as_ref()
        .map(|d| d.draft_values())
        .unwrap_or_else(|| input.draft_values());

    let lookup = match submit::proposed_cost_center(&current, &values) {
        Some(code) => match state.directory.lookup(&code).await {
            Ok(details) => details,
            Err(err) => {
                tracing::warn!(
                    cost_center = %code,
                    error = %err,
                    "Directory lookup failed, falling back to manual override"
                );
                None
            }
        },
        None => None,
    };

    let plan = submit::plan(platform, &current, &values, lookup.as_ref());
    let today = Utc::now().date_naive();

    let mut tx = state.pool.begin().await?;

    let mut updates: Vec<(&'static str, String)> = plan
        .updates
        .iter()
        .map(|(field, value)| (platform.column(*field), value.clone()))
        .collect();
    if let Some(owner) = &plan.owner_change {
        if let Some(wom) = ItOwnerReferenceRepo::wom_for(&mut *tx, owner).await? {
            updates.push(("it_owner_wom", wom));
        }
    }
    let fields_updated = updates.len();
    SubscriptionRepo::apply_updates(&mut *tx, platform, id, &updates).await?;
    SubscriptionRepo::stamp_last_review(&mut *tx, platform, id, today).await?;

    if let Some(change) = &plan.cost_center {
        let staged_value = |field: EditableField| {
            plan.updates
                .iter()
                .find(|(f, _)| *f == field)
                .map(|(_, v)| v.clone())
        };
        let approval = NewApproval {
            platform: platform.as_str().to_string(),
            subscription_id: id.to_string(),
            name: live.name.clone(),
            management_group: staged_value(EditableField::OrganizationalUnit)
                .or_else(|| live.management_group_oe.clone()),
            old_cost_center: live.cost_center.clone(),
            old_cost_center_responsible: live.cost_center_responsible.clone(),
            new_cost_center: change.new_code.clone(),
            new_cost_center_responsible: change.responsible.clone(),
            new_cost_center_name: (!change.name.is_empty()).then(|| change.name.clone()),
            it_owner: staged_value(EditableField::ItOwner).or_else(|| live.it_owner.clone()),
            last_review_date: today,
        };
        ApprovalRepo::upsert_pending(&mut *tx, &approval).await?;

        // The ticket carries no WOM column; the retained draft does. Restage
        // it so the WOM the directory resolved survives until the ticket is
        // decided, and so a draftless direct submit leaves one behind.
        let mut staged = stage_draft(platform, &current, &values);
        if !change.responsible_wom.is_empty() {
            staged.cost_center_responsible_wom_manual = change.responsible_wom.clone();
        }
        ProposalRepo::upsert(&mut *tx, id, platform, &staged).await?;
    } else {
        ProposalRepo::delete(&mut *tx, id, platform).await?;
    }

    tx.commit().await?;

    tracing::info!(
        %platform,
        subscription = %id,
        fields_updated,
        approval_required = plan.cost_center.is_some(),
        "Submission applied"
    );

    Ok(SubmitOutcome {
        fields_updated,
        approval_required: plan.cost_center.is_some(),
    })
}

/// Approve or reject the Pending cost-center ticket for a subscription.
///
/// A ticket can be resolved exactly once; when no Pending ticket exists the
/// resolution fails with NotFound. Approval writes the new cost-center
/// fields onto the live record; either way the ticket is marked with
/// today's date and the lingering draft is consumed. One transaction.
pub async fn resolve_approval(
    state: &AppState,
    platform: Platform,
    id: &str,
    action: ResolveAction,
) -> AppResult<()> {
    let mut tx = state.pool.begin().await?;

    let pending = ApprovalRepo::find_pending(&mut *tx, id, platform)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Pending approval",
                id: id.to_string(),
            })
        })?;

    let draft = ProposalRepo::find(&mut *tx, id, platform).await?;
    let wom = draft
        .as_ref()
        .and_then(|d| d.cost_center_responsible_wom_manual.clone())
        .filter(|w| !w.trim().is_empty());

    let today = Utc::now().date_naive();

    if action == ResolveAction::Approve {
        SubscriptionRepo::apply_cost_center(
            &mut *tx,
            platform,
            id,
            &pending.new_cost_center,
            &pending.new_cost_center_responsible,
            wom.as_deref(),
            pending.new_cost_center_name.as_deref(),
            today,
        )
        .await?;
    }

    // A concurrent resolution may have beaten us between the read and this
    // update; zero rows means the ticket is no longer Pending.
    let affected =
        ApprovalRepo::resolve(&mut *tx, id, platform, action.resulting_status(), today).await?;
    if affected == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Pending approval",
            id: id.to_string(),
        }));
    }

    ProposalRepo::delete(&mut *tx, id, platform).await?;

    tx.commit().await?;

    tracing::info!(
        %platform,
        subscription = %id,
        status = %action.resulting_status(),
        "Approval resolved"
    );
    Ok(())
}
