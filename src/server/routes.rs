//! Router configuration.
//!
//! This module defines the HTTP routes and applies CORS and tracing
//! middleware.
//!
//! # Route Structure
//!
//! ```text
//! /health        - Health check
//! /img/resize    - Image derivative endpoint
//! ```
//!
//! # Example
//!
//! ```ignore
//! use img_resizer::resize::{ArtifactStore, ResizeService};
//! use img_resizer::server::routes::{create_router, RouterConfig};
//! use img_resizer::source::FsImageSource;
//!
//! let source = FsImageSource::new("Images");
//! let store = ArtifactStore::new("Images/.cache");
//! let service = ResizeService::new(source, store);
//!
//! let router = create_router(service, RouterConfig::default());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{routing::get, Router};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{health_handler, resize_handler, AppState};
use crate::resize::{ResizeService, DEFAULT_QUALITY, DEFAULT_WIDTH};
use crate::source::ImageSource;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Cache-Control max-age in seconds for derivative responses
    pub cache_max_age: u32,

    /// Width used when the request does not specify one
    pub default_width: u32,

    /// Quality used when the request does not specify one
    pub default_quality: u8,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    /// Defaults:
    /// - CORS allows any origin
    /// - Cache max-age is 7 days (604800 seconds)
    /// - Width 400, quality 80
    /// - Tracing is enabled
    fn default() -> Self {
        Self {
            cors_origins: None,
            cache_max_age: 604_800,
            default_width: DEFAULT_WIDTH,
            default_quality: DEFAULT_QUALITY,
            enable_tracing: true,
        }
    }
}

impl RouterConfig {
    /// Create a configuration with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Set the Cache-Control max-age in seconds.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Set the fallback width and quality.
    pub fn with_defaults(mut self, width: u32, quality: u8) -> Self {
        self.default_width = width;
        self.default_quality = quality;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - Health check route
/// - Derivative endpoint
/// - CORS configuration
/// - Request tracing (optional)
pub fn create_router<S>(service: ResizeService<S>, config: RouterConfig) -> Router
where
    S: ImageSource + 'static,
{
    let mut app_state = AppState::new(service);
    app_state.cache_max_age = config.cache_max_age;
    app_state.default_width = config.default_width;
    app_state.default_quality = config.default_quality;

    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/img/resize", get(resize_handler::<S>))
        .with_state(app_state)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            // Parse origins into HeaderValues
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
