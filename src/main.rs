//! Image resize server binary.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use img_resizer::{
    config::Config,
    resize::{ArtifactStore, ResizeService},
    server::{create_router, RouterConfig},
    source::FsImageSource,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Images directory: {}", config.images_dir);
    info!("  Cache directory: {}", config.cache_dir().display());
    info!(
        "  Defaults: width {}px, quality {}",
        config.default_width, config.default_quality
    );
    info!("  Cache-Control max-age: {}s", config.cache_max_age);

    if !std::path::Path::new(&config.images_dir).is_dir() {
        error!(
            "Images directory '{}' does not exist or is not a directory",
            config.images_dir
        );
        return ExitCode::FAILURE;
    }

    let source = FsImageSource::new(&config.images_dir);
    let store = ArtifactStore::new(config.cache_dir());
    let service = ResizeService::new(source, store);

    let router = create_router(service, build_router_config(&config));

    let addr = config.bind_address();

    info!("Server listening on: http://{}", addr);
    info!("  Health:     curl http://{}/health", addr);
    info!(
        "  Derivative: curl 'http://{}/img/resize?path=a.jpg&w=400&q=80'",
        addr
    );

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "img_resizer=debug,tower_http=debug"
    } else {
        "img_resizer=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new()
        .with_cache_max_age(config.cache_max_age)
        .with_defaults(config.default_width, config.default_quality)
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}
