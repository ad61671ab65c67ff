//! # Error Types
//!
//! This module defines error types used throughout the barcanvas library.

use thiserror::Error;

/// Main error type for barcanvas operations
#[derive(Debug, Error)]
pub enum BarcanvasError {
    /// A setter received a value outside its valid range
    #[error("Invalid argument `{name}`: {message}")]
    Argument {
        name: &'static str,
        message: String,
    },

    /// The symbology encoder rejected the text
    #[error("Parse error: {0}")]
    Parse(String),

    /// Typeface loading error
    #[error("Font error: {0}")]
    Font(String),

    /// Drawing collaborator failure (surface, codec)
    #[error("Draw error: {0}")]
    Draw(String),

    /// Invalid render configuration
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BarcanvasError {
    pub(crate) fn argument(name: &'static str, message: impl Into<String>) -> Self {
        BarcanvasError::Argument {
            name,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for BarcanvasError {
    fn from(err: serde_json::Error) -> Self {
        BarcanvasError::Config(err.to_string())
    }
}

impl From<image::ImageError> for BarcanvasError {
    fn from(err: image::ImageError) -> Self {
        BarcanvasError::Draw(err.to_string())
    }
}

/// Result type alias for barcanvas operations
pub type Result<T> = std::result::Result<T, BarcanvasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_message() {
        let err = BarcanvasError::argument("scale", "The scale must be larger than 0.");
        assert_eq!(
            err.to_string(),
            "Invalid argument `scale`: The scale must be larger than 0."
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BarcanvasError = io.into();
        assert!(matches!(err, BarcanvasError::Io(_)));
    }
}
