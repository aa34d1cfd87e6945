//! Error types.

use thiserror::Error;

use crate::types::SaveOutcome;

pub type ImageResult<T> = Result<T, ImageError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("No focused window")]
    NoFocusedWindow,

    #[error("External URLs not supported in this example")]
    ExternalUrl,

    #[error("File not found")]
    FileNotFound,

    #[error("Save cancelled")]
    Cancelled,

    #[error("Asset unavailable: {0}")]
    AssetUnavailable(String),

    #[error("Share failed: {0}")]
    Share(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Image plugin not initialized")]
    NotInitialized,

    #[error("Platform not supported")]
    PlatformNotSupported,

    #[error("{0}")]
    Io(String),
}

impl From<std::io::Error> for ImageError {
    fn from(e: std::io::Error) -> Self {
        ImageError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ImageError {
    fn from(e: serde_json::Error) -> Self {
        ImageError::Serialization(e.to_string())
    }
}

impl From<ImageError> for SaveOutcome {
    fn from(e: ImageError) -> Self {
        match e {
            ImageError::Cancelled => SaveOutcome::cancelled(),
            other => SaveOutcome::failed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(ImageError::NoFocusedWindow.to_string(), "No focused window");
        assert_eq!(
            ImageError::ExternalUrl.to_string(),
            "External URLs not supported in this example"
        );
        assert_eq!(ImageError::FileNotFound.to_string(), "File not found");
    }

    #[test]
    fn test_cancel_carries_no_error() {
        let outcome = SaveOutcome::from(ImageError::Cancelled);
        assert!(!outcome.success);
        assert!(outcome.error.is_none());
        assert!(outcome.file_path.is_none());
    }

    #[test]
    fn test_io_error_is_stringified() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let outcome = SaveOutcome::from(ImageError::from(io));
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("denied"));
    }
}
