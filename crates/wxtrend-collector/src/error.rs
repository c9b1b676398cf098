use thiserror::Error;

/// Errors returned by the collector service client.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Network or TLS failure, or a non-2xx status from the collector.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid collector base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
