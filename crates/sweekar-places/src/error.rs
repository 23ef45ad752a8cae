use thiserror::Error;

/// Errors returned by the places backend client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success `status` such as `REQUEST_DENIED`
    /// or `OVER_QUERY_LIMIT`.
    #[error("places API returned {status}: {message}")]
    Api { status: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A detail record lacked a field the pipeline cannot do without.
    #[error("place {place_id} is missing {field}")]
    MissingField {
        place_id: String,
        field: &'static str,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
