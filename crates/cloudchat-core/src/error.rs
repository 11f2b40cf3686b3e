use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloudChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fault while handling a chat request. The Display form is what
    /// clients see in the `error` field of the /chat response.
    #[error("Processing error: {0}")]
    Processing(String),
}

impl CloudChatError {
    /// Short error code string, used in log fields.
    pub fn code(&self) -> &'static str {
        match self {
            CloudChatError::Config(_) => "CONFIG_ERROR",
            CloudChatError::Io(_) => "IO_ERROR",
            CloudChatError::Processing(_) => "PROCESSING_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = CloudChatError::Config("missing gateway".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing gateway");
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn processing_error_is_client_facing_text() {
        let err = CloudChatError::Processing("bad json".to_string());
        assert_eq!(err.to_string(), "Processing error: bad json");
        assert_eq!(err.code(), "PROCESSING_ERROR");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: CloudChatError = io.into();
        assert_eq!(err.code(), "IO_ERROR");
        assert!(err.to_string().contains("port taken"));
    }
}
