//! Configuration management.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `IMG_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use img_resizer::config::Config;
//!
//! // Parse from command line and environment
//! let config = Config::parse();
//!
//! println!("Listening on {}", config.bind_address());
//! println!("Serving images from {}", config.images_dir);
//! ```
//!
//! # Environment Variables
//!
//! All configuration options can be set via environment variables with the `IMG_` prefix:
//!
//! - `IMG_HOST` - Server bind address (default: 0.0.0.0)
//! - `IMG_PORT` - Server port (default: 5000)
//! - `IMG_IMAGES_DIR` - Source image directory (default: Images)
//! - `IMG_CACHE_DIR` - Derivative cache directory (default: <images-dir>/.cache)
//! - `IMG_DEFAULT_WIDTH` - Fallback width in pixels (default: 400)
//! - `IMG_DEFAULT_QUALITY` - Fallback quality 1-100 (default: 80)
//! - `IMG_CACHE_MAX_AGE` - HTTP cache max-age seconds (default: 604800)
//! - `IMG_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use std::path::PathBuf;

use clap::Parser;

use crate::resize::{DEFAULT_QUALITY, DEFAULT_WIDTH};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default source image directory.
pub const DEFAULT_IMAGES_DIR: &str = "Images";

/// Directory name for the derivative cache inside the images directory.
pub const CACHE_DIR_NAME: &str = ".cache";

/// Default HTTP cache max-age in seconds (7 days).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 604_800;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Image resize server.
///
/// Serves width-constrained WebP/JPEG derivatives of images from a local
/// directory, caching each generated derivative on disk.
#[derive(Parser, Debug, Clone)]
#[command(name = "img-resizer")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "IMG_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "IMG_PORT")]
    pub port: u16,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    /// Directory containing the source images.
    #[arg(long, default_value = DEFAULT_IMAGES_DIR, env = "IMG_IMAGES_DIR")]
    pub images_dir: String,

    /// Directory for cached derivatives.
    ///
    /// If not specified, uses `.cache` inside the images directory.
    #[arg(long, env = "IMG_CACHE_DIR")]
    pub cache_dir: Option<String>,

    // =========================================================================
    // Derivative Configuration
    // =========================================================================
    /// Width in pixels used when a request does not specify `w`.
    #[arg(long, default_value_t = DEFAULT_WIDTH, env = "IMG_DEFAULT_WIDTH")]
    pub default_width: u32,

    /// Quality (1-100) used when a request does not specify `q`.
    #[arg(long, default_value_t = DEFAULT_QUALITY, env = "IMG_DEFAULT_QUALITY")]
    pub default_quality: u8,

    /// HTTP Cache-Control max-age in seconds.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "IMG_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "IMG_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.images_dir.is_empty() {
            return Err(
                "Images directory is required. Set --images-dir or IMG_IMAGES_DIR".to_string(),
            );
        }

        if self.default_width == 0 {
            return Err("default_width must be greater than 0".to_string());
        }

        if self.default_quality == 0 || self.default_quality > 100 {
            return Err("default_quality must be between 1 and 100".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the derivative cache directory.
    pub fn cache_dir(&self) -> PathBuf {
        match &self.cache_dir {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(&self.images_dir).join(CACHE_DIR_NAME),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
