//! Derives the review status of a subscription from workflow state.

use sqlx::PgExecutor;

use ssp_core::platform::Platform;
use ssp_core::status::SubscriptionStatus;

use crate::DbPool;

/// Computes review statuses from the draft and approval tables.
pub struct SubscriptionStatusRepo;

impl SubscriptionStatusRepo {
    /// Status for one subscription.
    ///
    /// A Pending approval outranks a saved draft, which outranks a clean
    /// record. Overdue is reserved for an age-based policy and is never
    /// produced here.
    pub async fn status(
        pool: &DbPool,
        subscription_id: &str,
        platform: Platform,
    ) -> Result<SubscriptionStatus, sqlx::Error> {
        if Self::has_pending_approval(pool, subscription_id, platform).await? {
            return Ok(SubscriptionStatus::Check);
        }
        if Self::has_draft(pool, subscription_id, platform).await? {
            return Ok(SubscriptionStatus::InProgress);
        }
        Ok(SubscriptionStatus::UpToDate)
    }

    pub async fn has_pending_approval<'e>(
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

    pub async fn has_draft<'e>(
        executor: impl PgExecutor<'e>,
        subscription_id: &str,
        platform: Platform,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM proposed_changes \
             WHERE sub_id = $1 AND platform = $2)",
        )
        .bind(subscription_id)
        .bind(platform.as_str())
        .fetch_one(executor)
        .await
    }
}
