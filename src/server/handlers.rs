//! HTTP request handlers.
//!
//! # Endpoints
//!
//! - `GET /img/resize?path=<rel>&w=<int>&q=<int>` - Serve a resized derivative
//! - `GET /health` - Health check

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::ResizeError;
use crate::resize::{
    clamp_quality, OutputFormat, ResizeRequest, ResizeService, DEFAULT_QUALITY, DEFAULT_WIDTH,
};
use crate::source::ImageSource;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state, passed to handlers via Axum's State extractor.
pub struct AppState<S: ImageSource> {
    /// The resize service for processing derivative requests
    pub service: Arc<ResizeService<S>>,

    /// Cache-Control max-age in seconds for derivative responses
    pub cache_max_age: u32,

    /// Width used when `w` is absent or unparseable
    pub default_width: u32,

    /// Quality used when `q` is absent or unparseable
    pub default_quality: u8,
}

impl<S: ImageSource> AppState<S> {
    /// Create state with the default width/quality and a 7-day max-age.
    pub fn new(service: ResizeService<S>) -> Self {
        Self {
            service: Arc::new(service),
            cache_max_age: 604_800,
            default_width: DEFAULT_WIDTH,
            default_quality: DEFAULT_QUALITY,
        }
    }
}

impl<S: ImageSource> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            cache_max_age: self.cache_max_age,
            default_width: self.default_width,
            default_quality: self.default_quality,
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for `/img/resize`.
///
/// `w` and `q` are kept as raw strings so that non-numeric values fall back
/// to the configured defaults instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct ResizeQueryParams {
    /// Relative source path (percent-decoded by the extractor)
    #[serde(default)]
    pub path: Option<String>,

    /// Target width in pixels
    #[serde(default)]
    pub w: Option<String>,

    /// Encoding quality (1-100)
    #[serde(default)]
    pub q: Option<String>,
}

impl ResizeQueryParams {
    /// Parsed width, falling back to `default` when absent, non-numeric, or
    /// zero.
    pub fn width(&self, default: u32) -> u32 {
        self.w
            .as_deref()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|w| *w > 0)
            .unwrap_or(default)
    }

    /// Parsed quality clamped to 1-100, falling back to `default` when
    /// absent or non-numeric.
    pub fn quality(&self, default: u8) -> u8 {
        self.q
            .as_deref()
            .and_then(|s| s.parse::<u8>().ok())
            .map(clamp_quality)
            .unwrap_or(default)
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "invalid_path", "not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert ResizeError to an HTTP response.
///
/// Client errors (400/404) carry their message; server errors respond with a
/// generic message and log the detail server-side only.
impl IntoResponse for ResizeError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ResizeError::InvalidPath(e) => (
                StatusCode::BAD_REQUEST,
                "invalid_path",
                format!("Invalid path: {}", e),
            ),

            ResizeError::SourceNotFound { path } => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Image not found: {}", path),
            ),

            ResizeError::SourceIo(detail) => {
                error!(error_type = "source_io", "Failed to read source: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "processing_error",
                    "Error processing image".to_string(),
                )
            }

            ResizeError::Transform(e) => {
                error!(error_type = "transform", "Image transform failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "processing_error",
                    "Error processing image".to_string(),
                )
            }
        };

        if status == StatusCode::NOT_FOUND {
            // Common and expected; keep it quiet
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Resource not found: {}",
                message
            );
        } else if status.is_client_error() {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle derivative requests.
///
/// # Endpoint
///
/// `GET /img/resize?path=<relative-path>&w=<int>&q=<int>`
///
/// # Query Parameters
///
/// - `path`: source image path relative to the source root (required)
/// - `w`: target width in pixels (default: 400)
/// - `q`: encoding quality 1-100 (default: 80; ignored for WebP)
///
/// # Response
///
/// - `200 OK`: derivative bytes, `Content-Type` per the negotiated format
/// - `400 Bad Request`: missing path or traversal attempt
/// - `404 Not Found`: source image does not exist
/// - `500 Internal Server Error`: decode/encode failure
///
/// # Headers
///
/// - `Content-Type: image/webp | image/jpeg` (from the `Accept` header)
/// - `Cache-Control: public, max-age={cache_max_age}, immutable`
/// - `X-Image-Cache-Hit: true|false`
pub async fn resize_handler<S: ImageSource>(
    State(state): State<AppState<S>>,
    Query(query): Query<ResizeQueryParams>,
    headers: HeaderMap,
) -> Result<Response, ResizeError> {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let format = OutputFormat::negotiate(accept);

    let request = ResizeRequest::new(
        query.path.clone().unwrap_or_default(),
        query.width(state.default_width),
        query.quality(state.default_quality),
        format,
    );

    let response = state.service.get_derivative(request).await?;

    let http_response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, response.format.content_type())
        .header(
            header::CACHE_CONTROL,
            format!("public, max-age={}, immutable", state.cache_max_age),
        )
        .header("X-Image-Cache-Hit", response.cache_hit.to_string())
        .body(axum::body::Body::from(response.data))
        .unwrap();

    Ok(http_response)
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
