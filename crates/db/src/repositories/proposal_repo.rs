//! Repository for the `proposed_changes` table.

use sqlx::PgExecutor;

use ssp_core::draft::StagedDraft;
use ssp_core::platform::Platform;

use crate::models::proposal::ProposedChange;

/// Column list for proposed_changes queries.
const COLUMNS: &str = "id, sub_id, platform, \
    i_sc_original, i_sc_proposed, a_sc_original, a_sc_proposed, \
    c_sc_original, c_sc_proposed, \
    organizational_unit_original, organizational_unit_proposed, \
    environment_original, environment_proposed, \
    cost_center_original, cost_center_proposed, \
    it_owner_original, it_owner_proposed, \
    person_related_original, person_related_proposed, \
    cost_center_name_manual, cost_center_responsible_manual, \
    cost_center_responsible_wom_manual, created_at, updated_at";

/// Provides data access for in-flight draft changes.
pub struct ProposalRepo;

impl ProposalRepo {
    /// Upsert the draft for a subscription.
    ///
    /// Single atomic statement keyed on `(sub_id, platform)`: a first save
    /// inserts, a resave replaces every staged value. Entries in the staged
    /// draft are in `EditableField::ALL` order, matching the column list.
    pub async fn upsert<'e>(
        executor: impl PgExecutor<'e>,
        sub_id: &str,
        platform: Platform,
        draft: &StagedDraft,
    ) -> Result<ProposedChange, sqlx::Error> {
        let query = format!(
            "INSERT INTO proposed_changes (sub_id, platform, \
                i_sc_original, i_sc_proposed, a_sc_original, a_sc_proposed, \
                c_sc_original, c_sc_proposed, \
                organizational_unit_original, organizational_unit_proposed, \
                environment_original, environment_proposed, \
                cost_center_original, cost_center_proposed, \
                it_owner_original, it_owner_proposed, \
                person_related_original, person_related_proposed, \
                cost_center_name_manual, cost_center_responsible_manual, \
                cost_center_responsible_wom_manual) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, \
                     $13, $14, $15, $16, $17, $18, $19, $20, $21) \
             ON CONFLICT (sub_id, platform) DO UPDATE SET \
                i_sc_original = EXCLUDED.i_sc_original, \
                i_sc_proposed = EXCLUDED.i_sc_proposed, \
                a_sc_original = EXCLUDED.a_sc_original, \
                a_sc_proposed = EXCLUDED.a_sc_proposed, \
                c_sc_original = EXCLUDED.c_sc_original, \
                c_sc_proposed = EXCLUDED.c_sc_proposed, \
                organizational_unit_original = EXCLUDED.organizational_unit_original, \
                organizational_unit_proposed = EXCLUDED.organizational_unit_proposed, \
                environment_original = EXCLUDED.environment_original, \
                environment_proposed = EXCLUDED.environment_proposed, \
                cost_center_original = EXCLUDED.cost_center_original, \
                cost_center_proposed = EXCLUDED.cost_center_proposed, \
                it_owner_original = EXCLUDED.it_owner_original, \
                it_owner_proposed = EXCLUDED.it_owner_proposed, \
                person_related_original = EXCLUDED.person_related_original, \
                person_related_proposed = EXCLUDED.person_related_proposed, \
                cost_center_name_manual = EXCLUDED.cost_center_name_manual, \
                cost_center_responsible_manual = EXCLUDED.cost_center_responsible_manual, \
                cost_center_responsible_wom_manual = EXCLUDED.cost_center_responsible_wom_manual, \
                updated_at = now() \
             RETURNING {COLUMNS}"
        );

        let mut q = sqlx::query_as::<_, ProposedChange>(&query)
            .bind(sub_id)
            .bind(platform.as_str());
        for entry in &draft.entries {
            q = q.bind(&entry.original).bind(&entry.proposed);
        }
        q.bind(&draft.cost_center_name_manual)
            .bind(&draft.cost_center_responsible_manual)
            .bind(&draft.cost_center_responsible_wom_manual)
            .fetch_one(executor)
            .await
    }

    /// Point read by key.
    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        sub_id: &str,
        platform: Platform,
    ) -> Result<Option<ProposedChange>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM proposed_changes WHERE sub_id = $1 AND platform = $2"
        );
        sqlx::query_as::<_, ProposedChange>(&query)
            .bind(sub_id)
            .bind(platform.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Whether a draft exists for the key.
    pub async fn exists<'e>(
        executor: impl PgExecutor<'e>,
        sub_id: &str,
        platform: Platform,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM proposed_changes WHERE sub_id = $1 AND platform = $2)",
        )
        .bind(sub_id)
        .bind(platform.as_str())
        .fetch_one(executor)
        .await
    }

    /// Delete the draft for a key. Returns `true` if a row was removed.
    pub async fn delete<'e>(
        executor: impl PgExecutor<'e>,
        sub_id: &str,
        platform: Platform,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM proposed_changes WHERE sub_id = $1 AND platform = $2")
                .bind(sub_id)
                .bind(platform.as_str())
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
