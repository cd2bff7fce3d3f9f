use thiserror::Error;

/// Top-level error type for KrishiMitra.
#[derive(Debug, Error)]
pub enum KrishiError {
    /// The upload was missing, unnamed or empty. The message is shown to the caller as-is.
    #[error("{0}")]
    InvalidUpload(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedMedia(String),

    #[error("classifier error: {0}")]
    Classifier(String),

    #[error("invalid prediction: {0}")]
    InvalidPrediction(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KrishiError {
    /// Whether the error was caused by the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            KrishiError::InvalidUpload(_) | KrishiError::UnsupportedMedia(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_errors_are_client_errors() {
        assert!(KrishiError::InvalidUpload("No file selected".into()).is_client_error());
        assert!(KrishiError::UnsupportedMedia("text/plain".into()).is_client_error());
        assert!(!KrishiError::Classifier("timeout".into()).is_client_error());
    }

    #[test]
    fn invalid_upload_message_is_verbatim() {
        let err = KrishiError::InvalidUpload("No file selected".into());
        assert_eq!(err.to_string(), "No file selected");
    }
}
