//! Error types.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

/// Errors raised by the route algorithms, the live runner and configuration loading.
///
/// Too few cities is not an error: every algorithm answers with an empty
/// tour instead. Cancelling a live search is not an error either.
#[derive(Debug, thiserror::Error)]
pub enum TspError {
    /// Exhaustive search requested for more cities than it can enumerate.
    #[error("SizeLimitExceeded: {cities} cities given, brute force supports at most {limit}")]
    SizeLimitExceeded {
        /// Number of cities supplied.
        cities: usize,
        /// Hard upper bound.
        limit: usize,
    },
    /// An initial route that is not a permutation of all city ids.
    #[error("InvalidRoute: {reason}")]
    InvalidRoute {
        /// What is wrong with the route.
        reason: String,
    },
    /// A configuration value outside its domain.
    #[error("InvalidConfig: {reason}")]
    InvalidConfig {
        /// What is wrong with the value.
        reason: String,
    },
    /// Malformed TOML configuration.
    #[error("ConfigParse: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// Configuration file could not be read.
    #[error("Io: {0}")]
    Io(#[from] std::io::Error),
    /// The task running a live search panicked or was aborted.
    #[error("LiveSearchAborted: {0}")]
    LiveSearchAborted(String),
}

impl TspError {
    pub(crate) fn invalid_route(reason: impl Into<String>) -> Self {
        Self::InvalidRoute {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limit_message() {
        let err = TspError::SizeLimitExceeded {
            cities: 12,
            limit: 9,
        };
        assert_eq!(
            err.to_string(),
            "SizeLimitExceeded: 12 cities given, brute force supports at most 9"
        );
    }

    #[test]
    fn test_invalid_route_helper() {
        let err = TspError::invalid_route("duplicate city 3");
        assert!(matches!(err, TspError::InvalidRoute { .. }));
        assert_eq!(err.to_string(), "InvalidRoute: duplicate city 3");
    }
}
