//! API integration tests for derivative retrieval and error handling.
//!
//! Tests verify:
//! - Derivative retrieval with width/quality parameters
//! - Content negotiation via the Accept header
//! - Error cases (missing path, traversal, missing source, corrupt source)
//! - HTTP response codes and headers

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::test_utils::{
    create_test_jpeg, create_test_png, decoded_dimensions, is_valid_jpeg, is_valid_webp, TestTree,
};

// =============================================================================
// Basic Derivative Retrieval
// =============================================================================

#[tokio::test]
async fn test_resize_success_jpeg() {
    let tree = TestTree::new().with_file("photo.jpg", &create_test_jpeg(400, 300, 90));
    let router = tree.router();

    let request = Request::builder()
        .uri("/img/resize?path=photo.jpg&w=200&q=70")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/jpeg"
    );
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=604800, immutable"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(is_valid_jpeg(&body), "Response should be a valid JPEG");
    assert_eq!(decoded_dimensions(&body), (200, 150));
}

#[tokio::test]
async fn test_resize_negotiates_webp() {
    let tree = TestTree::new().with_file("photo.jpg", &create_test_jpeg(400, 300, 90));
    let router = tree.router();

    let request = Request::builder()
        .uri("/img/resize?path=photo.jpg&w=200")
        .header("accept", "image/webp,image/apng,*/*;q=0.8")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/webp"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(is_valid_webp(&body), "Response should be a valid WebP");
    assert_eq!(decoded_dimensions(&body).0, 200);
}

#[tokio::test]
async fn test_accept_without_webp_gets_jpeg() {
    let tree = TestTree::new().with_file("photo.jpg", &create_test_jpeg(400, 300, 90));
    let router = tree.router();

    let request = Request::builder()
        .uri("/img/resize?path=photo.jpg")
        .header("accept", "image/png, image/*;q=0.8")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/jpeg"
    );
}

#[tokio::test]
async fn test_default_width_and_quality() {
    let tree = TestTree::new().with_file("photo.jpg", &create_test_jpeg(800, 600, 90));
    let router = tree.router();

    // No w or q parameters
    let request = Request::builder()
        .uri("/img/resize?path=photo.jpg")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(decoded_dimensions(&body), (400, 300));
}

#[tokio::test]
async fn test_non_numeric_params_use_defaults() {
    let tree = TestTree::new().with_file("photo.jpg", &create_test_jpeg(800, 600, 90));
    let router = tree.router();

    let request = Request::builder()
        .uri("/img/resize?path=photo.jpg&w=huge&q=best")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(decoded_dimensions(&body), (400, 300));
}

#[tokio::test]
async fn test_png_source() {
    let tree = TestTree::new().with_file("art.png", &create_test_png(300, 200));
    let router = tree.router();

    let request = Request::builder()
        .uri("/img/resize?path=art.png&w=150")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(is_valid_jpeg(&body));
    assert_eq!(decoded_dimensions(&body), (150, 100));
}

#[tokio::test]
async fn test_nested_path() {
    let tree = TestTree::new().with_file("products/kojic/1.jpg", &create_test_jpeg(400, 300, 90));
    let router = tree.router();

    let request = Request::builder()
        .uri("/img/resize?path=products/kojic/1.jpg&w=100")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_mount_prefix_stripped() {
    let tree = TestTree::new().with_file("photo.jpg", &create_test_jpeg(400, 300, 90));
    let router = tree.router();

    // Leading slash and the public mount prefix are both stripped
    let request = Request::builder()
        .uri("/img/resize?path=/images/photo.jpg&w=100")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Error Cases - Bad Request
// =============================================================================

#[tokio::test]
async fn test_missing_path_rejected() {
    let tree = TestTree::new();
    let router = tree.router();

    let request = Request::builder()
        .uri("/img/resize?w=200")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "invalid_path");
}

#[tokio::test]
async fn test_traversal_rejected() {
    let tree = TestTree::new().with_file("photo.jpg", &create_test_jpeg(64, 64, 90));
    let router = tree.router();

    let request = Request::builder()
        .uri("/img/resize?path=../../etc/passwd")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "invalid_path");
}

#[tokio::test]
async fn test_traversal_through_valid_prefix_rejected() {
    let tree = TestTree::new().with_file("photo.jpg", &create_test_jpeg(64, 64, 90));
    let router = tree.router();

    // Normalization alone would not catch this without the post-check
    let request = Request::builder()
        .uri("/img/resize?path=photo.jpg/../../../secret.txt")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Error Cases - Not Found
// =============================================================================

#[tokio::test]
async fn test_source_not_found() {
    let tree = TestTree::new();
    let router = tree.router();

    let request = Request::builder()
        .uri("/img/resize?path=nonexistent.jpg")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "not_found");
}

// =============================================================================
// Error Cases - Processing Failure
// =============================================================================

#[tokio::test]
async fn test_corrupt_source_is_server_error() {
    let tree = TestTree::new().with_file("broken.jpg", &[0u8; 64]);
    let router = tree.router();

    let request = Request::builder()
        .uri("/img/resize?path=broken.jpg")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "processing_error");
    // Decode detail stays server-side
    assert_eq!(error["message"], "Error processing image");
}

// =============================================================================
// Health Endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let tree = TestTree::new();
    let router = tree.router();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert!(health["version"].is_string());
}

// =============================================================================
// Configured Defaults
// =============================================================================

#[tokio::test]
async fn test_configured_defaults_and_max_age() {
    use img_resizer::server::RouterConfig;

    let tree = TestTree::new().with_file("photo.jpg", &create_test_jpeg(800, 600, 90));
    let router = tree.router_with(
        RouterConfig::new()
            .with_defaults(100, 50)
            .with_cache_max_age(3600),
    );

    let request = Request::builder()
        .uri("/img/resize?path=photo.jpg")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=3600, immutable"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(decoded_dimensions(&body), (100, 75));
}
