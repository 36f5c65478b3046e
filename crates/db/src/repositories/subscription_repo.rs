//! Repository for the per-platform subscription tables.
//!
//! Physical table and column names come from the platform schema
//! descriptor; rows are read with logical aliases so one model struct
//! covers all three tables.

use sqlx::PgExecutor;

use ssp_core::platform::Platform;
use ssp_core::types::ReviewDate;

use crate::models::subscription::Subscription;

/// Build the aliased SELECT column list for a platform.
fn select_columns(platform: Platform) -> String {
    let schema = platform.schema();
    format!(
        "{id} AS id, {name} AS name, management_group_oe, it_owner, it_owner_wom, \
         cost_center, cost_center_name, cost_center_responsible, \
         cost_center_responsible_wom, {env} AS environment, i_sc, a_sc, c_sc, \
         {pr} AS person_related, last_review_date",
        id = schema.id_column,
        name = schema.name_column,
        env = schema.environment_column,
        pr = schema.person_related_column,
    )
}

/// Provides data access for the authoritative subscription records.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Point read by natural key.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        platform: Platform,
        id: &str,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let schema = platform.schema();
        let query = format!(
            "SELECT {columns} FROM {table} WHERE {id_col} = $1",
            columns = select_columns(platform),
            table = schema.table,
            id_col = schema.id_column,
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Subscriptions owned by any of the given (lowercased) emails, as IT
    /// owner or cost-center responsible.
    pub async fn list_by_emails<'e>(
        executor: impl PgExecutor<'e>,
        platform: Platform,
        emails: &[String],
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let schema = platform.schema();
        let query = format!(
            "SELECT {columns} FROM {table} \
             WHERE LOWER(it_owner) = ANY($1) \
                OR LOWER(cost_center_responsible) = ANY($1) \
             ORDER BY {name_col}",
            columns = select_columns(platform),
            table = schema.table,
            name_col = schema.name_column,
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(emails)
            .fetch_all(executor)
            .await
    }

    /// Apply staged column updates in a single UPDATE.
    ///
    /// Column names must come from the platform schema descriptor; values
    /// are bound. Returns the number of rows updated (0 or 1).
    pub async fn apply_updates<'e>(
        executor: impl PgExecutor<'e>,
        platform: Platform,
        id: &str,
        updates: &[(&'static str, String)],
    ) -> Result<u64, sqlx::Error> {
        if updates.is_empty() {
            return Ok(0);
        }
        let schema = platform.schema();
        let set_clause = updates
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{column} = ${}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "UPDATE {table} SET {set_clause} WHERE {id_col} = ${n}",
            table = schema.table,
            id_col = schema.id_column,
            n = updates.len() + 1,
        );

        let mut q = sqlx::query(&query);
        for (_, value) in updates {
            q = q.bind(value);
        }
        let result = q.bind(id).execute(executor).await?;
        Ok(result.rows_affected())
    }

    /// Stamp the last-review date.
    pub async fn stamp_last_review<'e>(
        executor: impl PgExecutor<'e>,
        platform: Platform,
        id: &str,
        date: ReviewDate,
    ) -> Result<u64, sqlx::Error> {
        let schema = platform.schema();
        let query = format!(
            "UPDATE {table} SET last_review_date = $1 WHERE {id_col} = $2",
            table = schema.table,
            id_col = schema.id_column,
        );
        let result = sqlx::query(&query)
            .bind(date)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Write an approved cost-center change onto the live record.
    ///
    /// Only the approval path touches these columns; Submit never does.
    #[allow(clippy::too_many_arguments)]
    pub async fn apply_cost_center<'e>(
        executor: impl PgExecutor<'e>,
        platform: Platform,
        id: &str,
        cost_center: &str,
        responsible: &str,
        responsible_wom: Option<&str>,
        name: Option<&str>,
        date: ReviewDate,
    ) -> Result<u64, sqlx::Error> {
        let schema = platform.schema();
        let query = format!(
            "UPDATE {table} SET \
                cost_center = $1, \
                cost_center_responsible = $2, \
                cost_center_responsible_wom = $3, \
                cost_center_name = $4, \
                last_review_date = $5 \
             WHERE {id_col} = $6",
            table = schema.table,
            id_col = schema.id_column,
        );
        let result = sqlx::query(&query)
            .bind(cost_center)
            .bind(responsible)
            .bind(responsible_wom)
            .bind(name)
            .bind(date)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
