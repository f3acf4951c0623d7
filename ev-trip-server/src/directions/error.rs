//! Directions client error types.

/// Errors from the directions HTTP client and route normalization.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid API key or unauthorized
    #[error("unauthorized (check GOOGLE_MAPS_API_KEY)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by directions API")]
    RateLimited,

    /// The provider answered but had no usable route
    #[error("no route found (status {status})")]
    NoRouteFound {
        status: String,
        message: Option<String>,
    },
}
