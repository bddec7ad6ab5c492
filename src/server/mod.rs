//! HTTP server layer.
//!
//! This module provides the HTTP API for serving cached image derivatives.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     HTTP Layer                       │
//! │        GET /img/resize?path=<rel>&w=<w>&q=<q>        │
//! │                                                      │
//! │  ┌─────────────────────┐  ┌───────────────────────┐  │
//! │  │      handlers       │  │        routes         │  │
//! │  │ (requests, errors)  │  │   (router config)     │  │
//! │  └─────────────────────┘  └───────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    health_handler, resize_handler, AppState, ErrorResponse, HealthResponse, ResizeQueryParams,
};
pub use routes::{create_router, RouterConfig};
