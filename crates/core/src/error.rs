//! Domain error taxonomy shared by the db and api layers.

/// Domain-level errors.
///
/// Subscriptions and approvals are keyed by platform-specific natural keys,
/// so `NotFound` carries the key as a string rather than a numeric id.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The named entity does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Entity kind, e.g. `"Subscription"` or `"PendingApproval"`.
        entity: &'static str,
        /// Natural key of the missing row.
        id: String,
    },

    /// The request carried invalid or missing input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller could not be identified.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
