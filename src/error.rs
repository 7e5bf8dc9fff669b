use thiserror::Error;

/// Errors that can occur while setting up the overlay
#[derive(Debug, Error)]
pub enum OverlayError {
    /// A surface or element the overlay needs was never provided
    #[error("Missing required resource: {0}")]
    MissingResource(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),
}

/// Result type for overlay setup operations
pub type OverlayResult<T> = Result<T, OverlayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_resource_message() {
        let err = OverlayError::MissingResource("ink surface");
        assert_eq!(err.to_string(), "Missing required resource: ink surface");
    }

    #[test]
    fn test_parse_error_converts() {
        let parse_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: OverlayError = parse_err.into();
        assert!(matches!(err, OverlayError::ConfigParse(_)));
    }
}
