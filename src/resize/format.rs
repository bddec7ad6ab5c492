//! Output format selection via content negotiation.

/// Encoding of a served derivative.
///
/// WebP is preferred when the caller advertises support for it; JPEG is the
/// universally supported baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Webp,
    Jpeg,
}

impl OutputFormat {
    /// Pick the output format from the request's `Accept` header.
    ///
    /// A case-insensitive substring match is sufficient here; a full
    /// media-type parser buys nothing for a binary webp-or-jpeg decision.
    pub fn negotiate(accept: &str) -> Self {
        if accept.to_ascii_lowercase().contains("image/webp") {
            OutputFormat::Webp
        } else {
            OutputFormat::Jpeg
        }
    }

    /// MIME type for the `Content-Type` response header.
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Webp => "image/webp",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// File extension used in cache keys, dot included.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Webp => ".webp",
            OutputFormat::Jpeg => ".jpg",
        }
    }
}
