//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Clone, Error)]
pub enum ApplicationError {
    /// Domain-level error, including malformed provider data
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Weather data could not be fetched
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Upstream rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Fetch(_))
    }

    /// Check if the upstream payload was unusable
    pub const fn is_data_error(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_data_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_message() {
        let err = ApplicationError::Fetch("HTTP 502".to_string());
        assert_eq!(err.to_string(), "Fetch error: HTTP 502");
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::missing_current_conditions().into();
        assert_eq!(
            err.to_string(),
            "Missing condition data: current has no weather descriptors"
        );
    }

    #[test]
    fn retryable_errors() {
        assert!(ApplicationError::RateLimited.is_retryable());
        assert!(ApplicationError::Fetch("x".into()).is_retryable());
        assert!(!ApplicationError::Internal("x".into()).is_retryable());
        assert!(!ApplicationError::from(DomainError::missing_current_conditions()).is_retryable());
    }

    #[test]
    fn data_errors() {
        assert!(ApplicationError::from(DomainError::missing_hourly_conditions(2)).is_data_error());
        assert!(!ApplicationError::Fetch("x".into()).is_data_error());
        assert!(
            !ApplicationError::from(DomainError::InvalidTimezone("x".into())).is_data_error()
        );
    }
}
