//! Feed ingestion error types.

use std::path::PathBuf;

/// Errors from reading or parsing a feed payload.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Payload file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload was not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::Io {
            path: PathBuf::from("/tmp/trains.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read /tmp/trains.json: no such file"
        );

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = FeedError::from(json_err);
        assert!(err.to_string().starts_with("JSON parse error: "));
    }
}
