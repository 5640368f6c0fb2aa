use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use merx_api::{app, AppState};
use merx_connect::{GeneratorConfig, MarketDataClient, ProviderConfig, TextGenerator};
use merx_core::pricing::PricingConfig;

/// State wired to unreachable collaborators: validation and pricing paths
/// run before any outbound call, and outbound failures translate to 500
fn test_state() -> AppState {
    let generation: GeneratorConfig = serde_json::from_value(serde_json::json!({
        "base_url": "http://127.0.0.1:9/v1",
        "api_key": "test-key",
        "model": "test-model",
    }))
    .unwrap();
    let provider: ProviderConfig = serde_json::from_value(serde_json::json!({
        "search_base_url": "http://127.0.0.1:9",
        "ad_base_url": "http://127.0.0.1:9",
        "client_id": "id",
        "client_secret": "secret",
        "ad_api_key": "key",
        "ad_secret_key": "secret",
        "ad_customer_id": "1",
    }))
    .unwrap();

    AppState {
        generator: Arc::new(TextGenerator::new(generation)),
        provider: Arc::new(MarketDataClient::new(provider)),
        pricing: PricingConfig::default(),
    }
}

async fn post_json(path: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

#[tokio::test]
async fn catalog_match_requires_both_prices() {
    let (status, body) = post_json(
        "/v1/catalog/match",
        serde_json::json!({ "lowestPrice": 8900 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "wholesalePrice is required");

    let (status, body) = post_json(
        "/v1/catalog/match",
        serde_json::json!({ "wholesalePrice": 5000 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "lowestPrice is required");
}

#[tokio::test]
async fn catalog_match_rejects_negative_price() {
    let (status, body) = post_json(
        "/v1/catalog/match",
        serde_json::json!({ "wholesalePrice": -5000, "lowestPrice": 8900 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("must not be negative"));
}

#[tokio::test]
async fn catalog_match_rejects_undercut_below_competitor_price() {
    // lowest = undercut offset drives the target price to zero; the margin
    // rate would divide by zero, so the request fails before generation
    let (status, body) = post_json(
        "/v1/catalog/match",
        serde_json::json!({ "wholesalePrice": 0, "lowestPrice": 50 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not positive"));
}

#[tokio::test]
async fn blog_generation_requires_topic() {
    let (status, body) = post_json(
        "/v1/generate/blog",
        serde_json::json!({ "keywords": "camping" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "topic is required");
}

#[tokio::test]
async fn all_script_routes_require_their_source_field() {
    let (status, body) = post_json(
        "/v1/generate/human-blog",
        serde_json::json!({ "experience": "rainy hike" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "topic is required");

    let (status, body) = post_json(
        "/v1/generate/repurpose",
        serde_json::json!({ "tone": "playful" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "content is required");

    let (status, body) = post_json("/v1/generate/shorts", serde_json::json!({ "hook": "tip" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "topic is required");

    let (status, body) = post_json(
        "/v1/generate/video",
        serde_json::json!({ "duration": "8 minutes" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "topic is required");
}

#[tokio::test]
async fn blank_keyword_is_rejected() {
    let (status, _) = post_json("/v1/keyword/analyze", serde_json::json!({ "keyword": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sourcing_requires_category_and_keyword() {
    let (status, body) = post_json(
        "/v1/sourcing/ideas",
        serde_json::json!({ "keyword": "spatula" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "category is required");
}

#[tokio::test]
async fn package_names_requires_keywords() {
    let (status, body) = post_json(
        "/v1/package/names",
        serde_json::json!({ "categoryName": "kitchen", "keywords": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "at least one keyword is required");
}

#[tokio::test]
async fn downstream_failure_maps_to_500_with_generic_message() {
    // Valid request, unreachable generation service
    let (status, body) = post_json(
        "/v1/generate/blog",
        serde_json::json!({ "topic": "camping chairs" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "generation failed");
}
