use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use serde_json::json;

use crate::integration::common::{post_json, setup_local_app, spawn_upstream};

const AMAZON_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Amazon.in</title></head><body>
  <h1 id="title"><span id="productTitle">   Samsung Galaxy M14 5G (Icy Silver, 6GB, 128GB Storage)   </span></h1>
  <div id="corePrice_feature_div">
    <span class="a-price"><span class="a-price-symbol">₹</span><span class="a-price-whole">13,999.</span><span class="a-price-fraction">00</span></span>
  </div>
  <div id="imgTagWrapperId"><img id="landingImage" alt="Samsung Galaxy M14" src="https://m.media-amazon.com/images/I/81ZSn2rk9WL._SX679_.jpg"></div>
</body></html>"#;

/// Flipkart page on a newer layout: price under a fallback class, no image.
const FLIPKART_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <h1 class="yhB1nd"><span class="VU-ZEz">boAt Rockerz 450 Bluetooth On Ear Headphones</span></h1>
  <div class="Nx9bqj CxhGGd">Special price</div>
  <div class="UqFsDK">₹1,499</div>
</body></html>"#;

fn store(path: &'static str, page: &'static str) -> Router {
    Router::new().route(path, get(move || async move { Html(page) }))
}

#[tokio::test]
async fn get_price_scrapes_amazon_page() {
    let addr = spawn_upstream(store("/amazon/dp/B0BZCR6PS5", AMAZON_PAGE)).await;

    let (status, json) = post_json(
        setup_local_app(0),
        "/get-price",
        json!({"url": format!("http://{addr}/amazon/dp/B0BZCR6PS5")}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "website": "Amazon",
            "title": "Samsung Galaxy M14 5G (Icy Silver, 6GB, 128GB Storage)",
            "price": "13,999.",
            "image": "https://m.media-amazon.com/images/I/81ZSn2rk9WL._SX679_.jpg",
        })
    );
}

#[tokio::test]
async fn get_price_degrades_missing_fields_to_sentinels() {
    let addr = spawn_upstream(store("/flipkart/p/itm42", FLIPKART_PAGE)).await;

    let (status, json) = post_json(
        setup_local_app(0),
        "/get-price",
        json!({"url": format!("http://{addr}/flipkart/p/itm42")}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["website"], "Flipkart");
    assert_eq!(json["title"], "boAt Rockerz 450 Bluetooth On Ear Headphones");
    assert_eq!(json["price"], "₹1,499");
    assert_eq!(json["image"], "Image not found");
}

#[tokio::test]
async fn get_price_sends_site_headers() {
    let seen = Arc::new(std::sync::Mutex::new(HeaderMap::new()));
    let upstream = {
        let seen = seen.clone();
        Router::new().route(
            "/snapdeal/product/1",
            get(move |headers: HeaderMap| {
                let seen = seen.clone();
                async move {
                    *seen.lock().unwrap() = headers;
                    Html("<html><body></body></html>")
                }
            }),
        )
    };
    let addr = spawn_upstream(upstream).await;

    let (status, _) = post_json(
        setup_local_app(0),
        "/get-price",
        json!({"url": format!("http://{addr}/snapdeal/product/1")}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let headers = seen.lock().unwrap().clone();
    assert_eq!(
        headers.get("user-agent").unwrap(),
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
    );
}

#[tokio::test]
async fn get_price_retries_then_returns_503() {
    let hits = Arc::new(AtomicUsize::new(0));
    let upstream = {
        let hits = hits.clone();
        Router::new().route(
            "/amazon/dp/DOWN",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::SERVICE_UNAVAILABLE, "try later")
                }
            }),
        )
    };
    let addr = spawn_upstream(upstream).await;

    let (status, json) = post_json(
        setup_local_app(2),
        "/get-price",
        json!({"url": format!("http://{addr}/amazon/dp/DOWN")}),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "Amazon temporarily unavailable");
    let details = json["details"].as_str().unwrap();
    assert!(details.contains("HTTP 503"), "{details}");
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn get_price_recovers_from_transient_failures() {
    let hits = Arc::new(AtomicUsize::new(0));
    let upstream = {
        let hits = hits.clone();
        Router::new().route(
            "/flipkart/p/flaky",
            get(move || {
                let hits = hits.clone();
                async move {
                    if hits.fetch_add(1, Ordering::SeqCst) < 2 {
                        (StatusCode::BAD_GATEWAY, Html("")).into_response()
                    } else {
                        Html(FLIPKART_PAGE).into_response()
                    }
                }
            }),
        )
    };
    let addr = spawn_upstream(upstream).await;

    let (status, json) = post_json(
        setup_local_app(2),
        "/get-price",
        json!({"url": format!("http://{addr}/flipkart/p/flaky")}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["price"], "₹1,499");
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}
