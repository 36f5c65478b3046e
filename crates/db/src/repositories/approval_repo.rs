//! Repository for the `cost_center_approvals` table.

use sqlx::PgExecutor;

use ssp_core::approval::ApprovalStatus;
use ssp_core::platform::Platform;
use ssp_core::types::ReviewDate;

use crate::models::approval::{CostCenterApproval, NewApproval};

/// Column list for cost_center_approvals queries.
const COLUMNS: &str = "id, platform, subscription_id, name, management_group, \
    old_cost_center, old_cost_center_responsible, new_cost_center, \
    new_cost_center_responsible, new_cost_center_name, it_owner, \
    last_review_date, status, created_at, updated_at";

/// Provides data access for cost-center approval tickets.
pub struct ApprovalRepo;

impl ApprovalRepo {
    /// The Pending ticket for a subscription, if any.
    pub async fn find_pending<'e>(
        executor: impl PgExecutor<'e>,
        subscription_id: &str,
        platform: Platform,
    ) -> Result<Option<CostCenterApproval>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cost_center_approvals \
             WHERE subscription_id = $1 AND platform = $2 AND status = 'Pending'"
        );
        sqlx::query_as::<_, CostCenterApproval>(&query)
            .bind(subscription_id)
            .bind(platform.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Whether a Pending ticket exists for the key.
    pub async fn pending_exists<'e>(
        executor: impl PgExecutor<'e>,
        subscription_id: &str,
        platform: Platform,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM cost_center_approvals \
             WHERE subscription_id = $1 AND platform = $2 AND status = 'Pending')",
        )
        .bind(subscription_id)
        .bind(platform.as_str())
        .fetch_one(executor)
        .await
    }

    /// Create or refresh the Pending ticket for a subscription.
    ///
    /// Single atomic upsert against the partial unique index: a second
    /// submission with a different cost center replaces the Pending ticket's
    /// values instead of creating a second row. Resolved tickets are never
    /// touched.
    pub async fn upsert_pending<'e>(
        executor: impl PgExecutor<'e>,
        input: &NewApproval,
    ) -> Result<CostCenterApproval, sqlx::Error> {
        let query = format!(
            "INSERT INTO cost_center_approvals \
                (platform, subscription_id, name, management_group, \
                 old_cost_center, old_cost_center_responsible, \
                 new_cost_center, new_cost_center_responsible, \
                 new_cost_center_name, it_owner, last_review_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'Pending') \
             ON CONFLICT (subscription_id, platform) WHERE status = 'Pending' \
             DO UPDATE SET \
                name = EXCLUDED.name, \
                management_group = EXCLUDED.management_group, \
                old_cost_center = EXCLUDED.old_cost_center, \
                old_cost_center_responsible = EXCLUDED.old_cost_center_responsible, \
                new_cost_center = EXCLUDED.new_cost_center, \
                new_cost_center_responsible = EXCLUDED.new_cost_center_responsible, \
                new_cost_center_name = EXCLUDED.new_cost_center_name, \
                it_owner = EXCLUDED.it_owner, \
                last_review_date = EXCLUDED.last_review_date, \
                updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CostCenterApproval>(&query)
            .bind(&input.platform)
            .bind(&input.subscription_id)
            .bind(&input.name)
            .bind(&input.management_group)
            .bind(&input.old_cost_center)
            .bind(&input.old_cost_center_responsible)
            .bind(&input.new_cost_center)
            .bind(&input.new_cost_center_responsible)
            .bind(&input.new_cost_center_name)
            .bind(&input.it_owner)
            .bind(input.last_review_date)
            .fetch_one(executor)
            .await
    }

    /// Transition the Pending ticket to a terminal status.
    ///
    /// Returns the number of rows updated: 0 means there was no Pending
    /// ticket (already resolved or never created) and the caller must treat
    /// the resolution as NotFound.
    pub async fn resolve<'e>(
        executor: impl PgExecutor<'e>,
        subscription_id: &str,
        platform: Platform,
        status: ApprovalStatus,
        date: ReviewDate,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cost_center_approvals \
             SET status = $1, last_review_date = $2, updated_at = now() \
             WHERE subscription_id = $3 AND platform = $4 AND status = 'Pending'",
        )
        .bind(status.as_str())
        .bind(date)
        .bind(subscription_id)
        .bind(platform.as_str())
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Review inbox: tickets addressed to any of the given (lowercased)
    /// responsible emails, newest review date first.
    pub async fn list_for_responsible<'e>(
        executor: impl PgExecutor<'e>,
        emails: &[String],
    ) -> Result<Vec<CostCenterApproval>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cost_center_approvals \
             WHERE LOWER(new_cost_center_responsible) = ANY($1) \
             ORDER BY last_review_date DESC"
        );
        sqlx::query_as::<_, CostCenterApproval>(&query)
            .bind(emails)
            .fetch_all(executor)
            .await
    }
}
