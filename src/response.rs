//! Response wrapper that preserves both parsed data and raw response details.
//!
//! The [`Response`] type wraps the JSON returned by the conversion node along
//! with the status, headers, latency and raw body of the HTTP exchange.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful response from the conversion node.
///
/// The node's JSON is passed through untouched in `data`.
///
/// # Examples
///
/// ```no_run
/// use videoconvert::{Client, ConnectionSettings, ConvertOptions};
///
/// # async fn example() -> Result<(), videoconvert::Error> {
/// let client = Client::new(ConnectionSettings::new().host("localhost").port("8886"))?;
///
/// let response = client
///     .convert(&ConvertOptions::new().video_link("http://host/video.ogv"))
///     .await?;
///
/// println!("Key: {:?}", response.key());
/// println!("Request took {:?}", response.latency);
/// println!("Raw body: {}", response.raw_body);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T = serde_json::Value> {
    /// The parsed response data.
    pub data: T,

    /// The raw response body as a string.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from sending the request until the response body was read.
    pub latency: Duration,
}

impl<T> Response<T> {
    /// Creates a new `Response`.
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
        }
    }

    /// Maps the response data to a different type using the provided function.
    ///
    /// # Examples
    ///
    /// ```
    /// # use videoconvert::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response::new(
    ///     serde_json::json!({ "done": true }),
    ///     r#"{"done":true}"#.to_string(),
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(100),
    /// );
    ///
    /// let done = response.map(|data| data["done"] == true);
    /// assert!(done.data);
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
        }
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl Response<serde_json::Value> {
    /// Returns the key the node assigned to a submitted video.
    ///
    /// The node reports it as `video_key`; older nodes use `key`.
    pub fn key(&self) -> Option<&str> {
        self.data
            .get("video_key")
            .or_else(|| self.data.get("key"))
            .and_then(|key| key.as_str())
    }

    /// Returns the `done` flag of a status response, if present.
    pub fn is_done(&self) -> Option<bool> {
        self.data.get("done")?.as_bool()
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(data: serde_json::Value) -> Response {
        let raw_body = data.to_string();
        Response::new(
            data,
            raw_body,
            StatusCode::OK,
            HeaderMap::new(),
            Duration::ZERO,
        )
    }

    #[test]
    fn key_prefers_video_key() {
        assert_eq!(
            response(json!({ "video_key": "a", "key": "b" })).key(),
            Some("a")
        );
        assert_eq!(response(json!({ "key": "b" })).key(), Some("b"));
        assert_eq!(response(json!({ "done": true })).key(), None);
    }

    #[test]
    fn done_flag() {
        assert_eq!(response(json!({ "done": true })).is_done(), Some(true));
        assert_eq!(response(json!({ "done": false })).is_done(), Some(false));
        assert_eq!(response(json!({ "key": "a" })).is_done(), None);
    }

    #[test]
    fn header_lookup() {
        let mut response = response(json!({ "done": true }));
        response.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );

        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn deref_reaches_data() {
        let response = response(json!({ "done": true }));
        assert_eq!(response["done"], json!(true));
    }
}
