//! POI provider error types.

use crate::domain::Source;

/// A single provider call failed.
///
/// Inside the station pipeline these are absorbed: the failing
/// provider/point pair contributes no stations and the rest carries on.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Network failure, timeout, or a non-success status
    #[error("{provider} provider unavailable: {message}")]
    Unavailable { provider: Source, message: String },

    /// Response body did not match the provider schema
    #[error("malformed {provider} response: {message}")]
    Malformed { provider: Source, message: String },
}

impl ProviderError {
    pub fn unavailable(provider: Source, message: impl Into<String>) -> Self {
        ProviderError::Unavailable {
            provider,
            message: message.into(),
        }
    }

    pub fn malformed(provider: Source, message: impl Into<String>) -> Self {
        ProviderError::Malformed {
            provider,
            message: message.into(),
        }
    }

    /// The provider that failed.
    pub fn provider(&self) -> Source {
        match self {
            ProviderError::Unavailable { provider, .. } | ProviderError::Malformed { provider, .. } => {
                *provider
            }
        }
    }

    /// Whether retrying the same call might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Unavailable { .. })
    }
}
