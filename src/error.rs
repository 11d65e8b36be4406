//! Error types for conversion node calls.
//!
//! Every failure the conversion node can report maps onto one variant of
//! [`Error`]. Variants derived from an HTTP status keep the raw response body
//! so callers can see exactly what the node said.

use http::StatusCode;

/// Substring the conversion node puts in a 500 body when its storage node
/// (SAM) could not be reached.
pub const SAM_ERROR_MARKER: &str = "SAM";

/// The main error type for conversion node calls.
///
/// # Examples
///
/// ```no_run
/// use videoconvert::{Client, ConnectionSettings, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new(ConnectionSettings::new().host("localhost").port("8886"))?;
///
/// match client.done("some-key").await {
///     Ok(response) => println!("done: {:?}", response.is_done()),
///     Err(Error::KeyNotFound { .. }) => eprintln!("no such conversion"),
///     Err(Error::ConnectionRefused { address, .. }) => eprintln!("nothing listening on {}", address),
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// None of the accepted input combinations was supplied to `convert`.
    ///
    /// Raised before any network call is made. `convert` needs one of
    /// `video_link`, `sam_uid` + `filename`, or `file` + `filename`.
    #[error("Missing parameters: expected video_link, sam_uid and filename, or file and filename")]
    MissingParameters,

    /// No connection could be established to the configured node.
    #[error("Connection refused by {address}: {source}")]
    ConnectionRefused {
        /// The address the client tried to reach.
        address: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The node rejected the configured credentials (HTTP 401).
    #[error("Authentication failed: {raw_response}")]
    Authentication {
        /// The raw response body
        raw_response: String,
    },

    /// The requested key does not exist on the node (HTTP 404).
    #[error("Key not found: {raw_response}")]
    KeyNotFound {
        /// The raw response body
        raw_response: String,
    },

    /// The node rejected the request body (HTTP 400).
    #[error("Malformed request: {raw_response}")]
    MalformedRequest {
        /// The raw response body
        raw_response: String,
    },

    /// The node could not reach its queue service (HTTP 503).
    #[error("Queue service connection error: {raw_response}")]
    QueueServiceConnection {
        /// The raw response body
        raw_response: String,
    },

    /// The node could not reach its storage node (HTTP 500 carrying the SAM marker).
    #[error("SAM connection error: {raw_response}")]
    SamConnection {
        /// The raw response body
        raw_response: String,
    },

    /// Any other transport-level failure, such as a connection dropped mid-response.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The request exceeded the timeout configured on the client.
    #[error("Request timed out")]
    Timeout,

    /// The response was not one of the error statuses, but its body is not JSON.
    ///
    /// # Fields
    ///
    /// * `raw_response` - The raw response body as a string
    /// * `serde_error` - The error message from serde
    /// * `status` - The HTTP status code of the response
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// The connection settings cannot be turned into a usable client.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The configured host does not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Maps a response status (and, for 500, its body) to a typed error.
    ///
    /// Returns `None` when the response should be treated as a success and
    /// parsed as JSON. A 500 whose body lacks [`SAM_ERROR_MARKER`] falls in
    /// that category as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use http::StatusCode;
    /// use videoconvert::Error;
    ///
    /// let err = Error::from_response(StatusCode::NOT_FOUND, "no such key");
    /// assert!(matches!(err, Some(Error::KeyNotFound { .. })));
    ///
    /// let err = Error::from_response(StatusCode::INTERNAL_SERVER_ERROR, "SAM unreachable");
    /// assert!(matches!(err, Some(Error::SamConnection { .. })));
    ///
    /// assert!(Error::from_response(StatusCode::OK, "{}").is_none());
    /// ```
    pub fn from_response(status: StatusCode, body: &str) -> Option<Self> {
        let raw_response = body.to_string();
        match status {
            StatusCode::NOT_FOUND => Some(Error::KeyNotFound { raw_response }),
            StatusCode::BAD_REQUEST => Some(Error::MalformedRequest { raw_response }),
            StatusCode::UNAUTHORIZED => Some(Error::Authentication { raw_response }),
            StatusCode::SERVICE_UNAVAILABLE => Some(Error::QueueServiceConnection { raw_response }),
            StatusCode::INTERNAL_SERVER_ERROR if body.contains(SAM_ERROR_MARKER) => {
                Some(Error::SamConnection { raw_response })
            }
            _ => None,
        }
    }

    /// Classifies a transport error raised while sending to `address`.
    ///
    /// Any failure to establish the connection, including a host name that
    /// does not resolve, becomes [`Error::ConnectionRefused`].
    pub fn from_transport(error: reqwest::Error, address: impl Into<String>) -> Self {
        if error.is_connect() {
            Error::ConnectionRefused {
                address: address.into(),
                source: error,
            }
        } else if error.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(error)
        }
    }

    /// Returns the HTTP status code this error was derived from, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::KeyNotFound { .. } => Some(StatusCode::NOT_FOUND),
            Error::MalformedRequest { .. } => Some(StatusCode::BAD_REQUEST),
            Error::Authentication { .. } => Some(StatusCode::UNAUTHORIZED),
            Error::QueueServiceConnection { .. } => Some(StatusCode::SERVICE_UNAVAILABLE),
            Error::SamConnection { .. } => Some(StatusCode::INTERNAL_SERVER_ERROR),
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::KeyNotFound { raw_response }
            | Error::MalformedRequest { raw_response }
            | Error::Authentication { raw_response }
            | Error::QueueServiceConnection { raw_response }
            | Error::SamConnection { raw_response }
            | Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for conversion node calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_error_statuses() {
        assert!(matches!(
            Error::from_response(StatusCode::NOT_FOUND, ""),
            Some(Error::KeyNotFound { .. })
        ));
        assert!(matches!(
            Error::from_response(StatusCode::BAD_REQUEST, ""),
            Some(Error::MalformedRequest { .. })
        ));
        assert!(matches!(
            Error::from_response(StatusCode::UNAUTHORIZED, ""),
            Some(Error::Authentication { .. })
        ));
        assert!(matches!(
            Error::from_response(StatusCode::SERVICE_UNAVAILABLE, ""),
            Some(Error::QueueServiceConnection { .. })
        ));
    }

    #[test]
    fn internal_error_needs_sam_marker() {
        let err = Error::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Couldn't connect to SAM",
        )
        .unwrap();
        assert!(matches!(err, Error::SamConnection { .. }));
        assert_eq!(err.raw_response(), Some("Couldn't connect to SAM"));
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));

        assert!(Error::from_response(StatusCode::INTERNAL_SERVER_ERROR, "boom").is_none());
    }

    #[test]
    fn other_statuses_are_not_errors() {
        for status in [
            StatusCode::OK,
            StatusCode::CREATED,
            StatusCode::ACCEPTED,
            StatusCode::FORBIDDEN,
            StatusCode::BAD_GATEWAY,
        ] {
            assert!(Error::from_response(status, "{}").is_none(), "{}", status);
        }
    }

    #[test]
    fn missing_parameters_has_no_response() {
        let err = Error::MissingParameters;
        assert_eq!(err.status(), None);
        assert_eq!(err.raw_response(), None);
    }
}
