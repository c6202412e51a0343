use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use crate::integration::common::{post_json, post_raw, setup_test_app};

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app();

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(), "{timestamp}");
}

// ---------------------------------------------------------------------------
// /get-price input errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_price_empty_url_returns_400() {
    let (status, json) = post_json(setup_test_app(), "/get-price", json!({"url": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "No URL provided"}));
}

#[tokio::test]
async fn get_price_whitespace_url_returns_400() {
    let (status, json) = post_json(setup_test_app(), "/get-price", json!({"url": "   "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No URL provided");
}

#[tokio::test]
async fn get_price_missing_url_returns_400() {
    let (status, json) = post_json(setup_test_app(), "/get-price", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No URL provided");
}

#[tokio::test]
async fn get_price_unsupported_site_returns_400() {
    let (status, json) = post_json(
        setup_test_app(),
        "/get-price",
        json!({"url": "https://www.example.com/x"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Website not supported"}));
}

#[tokio::test]
async fn get_price_private_address_is_refused() {
    let (status, json) = post_json(
        setup_test_app(),
        "/get-price",
        json!({"url": "http://127.0.0.1:9/amazon/dp/B0TEST"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "URL not allowed");
    assert!(json["details"].as_str().unwrap().contains("127.0.0.1"));
}

#[tokio::test]
async fn get_price_non_http_scheme_is_refused() {
    let (status, json) = post_json(
        setup_test_app(),
        "/get-price",
        json!({"url": "ftp://files.amazon.in/catalog"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "URL not allowed");
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_price_empty_body_returns_400_json() {
    let (status, json) = post_raw(setup_test_app(), "/get-price", None, "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "No URL provided"}));
}

#[tokio::test]
async fn get_price_empty_json_body_returns_400_json() {
    let (status, json) =
        post_raw(setup_test_app(), "/get-price", Some("application/json"), "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No URL provided");
}

#[tokio::test]
async fn get_price_without_content_type_ignores_body() {
    let (status, json) = post_raw(
        setup_test_app(),
        "/get-price",
        None,
        r#"{"url": "https://www.amazon.in/dp/B0TEST"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No URL provided");
}

#[tokio::test]
async fn get_price_wrongly_typed_url_returns_400_json() {
    let (status, json) = post_raw(
        setup_test_app(),
        "/get-price",
        Some("application/json"),
        r#"{"url": 42}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("Invalid JSON body"), "{error}");
}

#[tokio::test]
async fn get_price_malformed_json_returns_400_json() {
    let (status, json) = post_raw(
        setup_test_app(),
        "/get-price",
        Some("application/json"),
        "{\"url\": ",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn compare_prices_empty_body_returns_400_json() {
    let (status, json) = post_raw(setup_test_app(), "/compare-prices", None, "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Product name or URL required"}));
}

// ---------------------------------------------------------------------------
// /compare-prices
// ---------------------------------------------------------------------------

#[tokio::test]
async fn compare_prices_requires_name_or_url() {
    let (status, json) = post_json(setup_test_app(), "/compare-prices", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Product name or URL required");
}

#[tokio::test]
async fn compare_prices_blank_fields_count_as_absent() {
    let (status, _) = post_json(
        setup_test_app(),
        "/compare-prices",
        json!({"productName": "  ", "url": ""}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn compare_prices_returns_empty_placeholder() {
    let (status, json) = post_json(
        setup_test_app(),
        "/compare-prices",
        json!({"productName": "Samsung Galaxy M14"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Samsung Galaxy M14");
    assert_eq!(json["website"], "Multiple");
    assert_eq!(json["prices"], json!([]));
    assert!(json["image"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn compare_prices_with_url_only_uses_generic_title() {
    let (status, json) = post_json(
        setup_test_app(),
        "/compare-prices",
        json!({"url": "https://www.amazon.in/dp/B0TEST"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Product");
}

// ---------------------------------------------------------------------------
// Middleware & docs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_allows_any_origin() {
    let response = setup_test_app()
        .oneshot(
            Request::get("/health")
                .header("origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let response = setup_test_app()
        .oneshot(
            Request::get("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    for path in ["/get-price", "/compare-prices", "/health"] {
        assert!(json["paths"].get(path).is_some(), "missing {path}");
    }
}
