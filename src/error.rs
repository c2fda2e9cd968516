use thiserror::Error;

/// Main error type for ragrouter
///
/// Routing itself is total over any input string and never fails; errors can
/// only arise while loading or validating configuration at construction time.
#[derive(Error, Debug)]
pub enum RouterError {
    /// Configuration errors (bad thresholds, empty keyword lists, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Convenient Result type using RouterError
pub type Result<T> = std::result::Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouterError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let router_err: RouterError = io_err.into();
        assert!(matches!(router_err, RouterError::Io(_)));
    }
}
