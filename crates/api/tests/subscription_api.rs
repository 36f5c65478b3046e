//! Integration tests for the owner-scoped subscription listing.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_as, principal_header, seed_azure};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_is_scoped_to_the_caller(pool: PgPool) {
    seed_azure(&pool, "sub-mine", "alice@example.com").await;
    seed_azure(&pool, "sub-theirs", "bob@example.com").await;
    let app = common::build_test_app(pool);

    let principal = principal_header("Alice", "Alice@Example.com");
    let response = get_as(app, "/api/v1/subscriptions?platform=Azure", &principal).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let listings = json["data"].as_array().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["platform"], "Azure");

    let subs = listings[0]["subscriptions"].as_array().unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0]["id"], "sub-mine");
    assert_eq!(subs[0]["status"], "Up to date");
    assert_eq!(listings[0]["counts"]["total"], 1);
    assert_eq!(listings[0]["counts"]["up_to_date"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cost_center_responsible_sees_the_subscription_too(pool: PgPool) {
    // seed_azure sets cost_center_responsible to old.resp@example.com.
    seed_azure(&pool, "sub-1", "someone.else@example.com").await;
    let app = common::build_test_app(pool);

    let principal = principal_header("Resp", "old.resp@example.com");
    let response = get_as(app, "/api/v1/subscriptions?platform=Azure", &principal).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["subscriptions"][0]["id"], "sub-1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn absent_filter_covers_all_three_platforms(pool: PgPool) {
    let app = common::build_test_app(pool);

    let principal = principal_header("Alice", "alice@example.com");
    let response = get_as(app, "/api/v1/subscriptions", &principal).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let platforms: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["platform"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(platforms, vec!["Azure", "AWS", "GCP"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_platform_filter_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/subscriptions?platform=Oracle").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guest_without_identity_header_sees_nothing(pool: PgPool) {
    seed_azure(&pool, "sub-1", "alice@example.com").await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/subscriptions?platform=Azure").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["data"][0]["subscriptions"].as_array().unwrap().len(),
        0
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_identity_header_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_as(app, "/api/v1/subscriptions", "not-base64!!!").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn directory_proxy_returns_derived_fields(pool: PgPool) {
    use std::sync::Arc;
    let directory = Arc::new(common::StubDirectory::with_entry(
        "0099999999",
        common::directory_details("0099999999"),
    ));
    let app = common::build_test_app_with_directory(pool, directory);

    let response = common::post_json(
        app.clone(),
        "/api/v1/directory/cost-center",
        json!({ "cost_center": "0099999999" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Payroll GS (PAY-1)");
    assert_eq!(json["data"]["responsible"], "r.party@bosch.com");
    assert_eq!(json["data"]["responsible_wom"], "WOM-DIR");

    // Unknown code means the widening retry came up empty.
    let response = common::post_json(
        app,
        "/api/v1/directory/cost-center",
        json!({ "cost_center": "0000000042" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn it_owner_proxy_returns_empty_for_unknown_owner(pool: PgPool) {
    common::seed_it_owner_wom(&pool, "known@example.com", "WOM-1").await;
    let app = common::build_test_app(pool);

    let response = common::post_json(
        app.clone(),
        "/api/v1/directory/it-owner",
        json!({ "it_owner": "known@example.com" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["it_owner_wom"], "WOM-1");

    let response = common::post_json(
        app,
        "/api/v1/directory/it-owner",
        json!({ "it_owner": "unknown@example.com" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["it_owner_wom"], "");
}
