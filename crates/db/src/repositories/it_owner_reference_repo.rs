//! Repository for the `it_owner_reference` lookup table.

use sqlx::PgExecutor;

/// Provides WOM ID lookups for known IT owners.
pub struct ItOwnerReferenceRepo;

impl ItOwnerReferenceRepo {
    /// WOM ID registered for an IT owner email, matched case-insensitively.
    pub async fn wom_for<'e>(
        executor: impl PgExecutor<'e>,
        it_owner: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT it_owner_wom FROM it_owner_reference WHERE LOWER(it_owner) = LOWER($1)",
        )
        .bind(it_owner)
        .fetch_optional(executor)
        .await
    }
}
