pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// GET    /subscriptions                                  owner-scoped listing (?platform=)
/// GET    /subscriptions/{platform}/{id}                  detail with merged draft
/// PUT    /subscriptions/{platform}/{id}/draft            save draft
/// DELETE /subscriptions/{platform}/{id}/draft            discard draft
/// POST   /subscriptions/{platform}/{id}/submit           submit staged changes
/// POST   /subscriptions/{platform}/{id}/resolution       approve / reject ticket
///
/// GET    /approvals                                      review inbox
///
/// POST   /directory/cost-center                          directory lookup proxy
/// POST   /directory/it-owner                             WOM reference lookup
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/subscriptions", get(handlers::subscription::list))
        .route(
            "/subscriptions/{platform}/{id}",
            get(handlers::subscription::get_by_id),
        )
        .route(
            "/subscriptions/{platform}/{id}/draft",
            put(handlers::draft::save).delete(handlers::draft::discard),
        )
        .route(
            "/subscriptions/{platform}/{id}/submit",
            post(handlers::submission::submit),
        )
        .route(
            "/subscriptions/{platform}/{id}/resolution",
            post(handlers::approval::resolve),
        )
        .route("/approvals", get(handlers::approval::inbox))
        .route(
            "/directory/cost-center",
            post(handlers::directory::lookup_cost_center),
        )
        .route(
            "/directory/it-owner",
            post(handlers::directory::lookup_it_owner),
        )
}
