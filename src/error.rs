use thiserror::Error;

/// Main error type for the forex environment
#[derive(Error, Debug)]
pub enum FxError {
    // Bookkeeping errors
    #[error("Invalid exchange rate: {0} (must be finite and positive)")]
    InvalidRate(f64),

    #[error("Invalid account state: {0}")]
    InvalidState(String),

    // Market data errors
    #[error("Invalid market data: {0}")]
    InvalidMarketData(String),

    // Environment errors
    #[error("Invalid action index: {0}")]
    InvalidAction(usize),

    #[error("Episode finished, call reset() before stepping again")]
    EpisodeFinished,

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Serialization errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for FxError
pub type Result<T> = std::result::Result<T, FxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rate_message_includes_value() {
        let err = FxError::InvalidRate(-1.5);
        assert!(err.to_string().contains("-1.5"));
    }

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> Result<()> {
            std::fs::File::open("/definitely/not/here.csv")?;
            Ok(())
        }

        let err = open_missing().unwrap_err();
        assert!(matches!(err, FxError::Io(_)));
    }
}
