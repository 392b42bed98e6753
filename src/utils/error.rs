//! Error types for setlock-benchmark

use std::io;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum BenchmarkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Worker error: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, BenchmarkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        fn open_missing() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/a/path")?)
        }
        assert!(matches!(open_missing(), Err(BenchmarkError::Io(_))));
    }

    #[test]
    fn test_config_error_message() {
        let err = BenchmarkError::Config("bad mix".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad mix");
    }
}
