//! HTTP client for a video conversion node.
//!
//! The [`Client`] type is the main entry point. Use [`Client::new`] for the
//! common case or [`ClientBuilder`] to pass explicit defaults or a timeout.

use crate::{
    config::{self, ConnectionSettings},
    request::{ConversionRequest, ConvertOptions, StatusRequest},
    Error, Response, Result,
};
use http::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// A connection to one conversion node.
///
/// Settings are resolved once, when the client is built, and never change
/// afterwards. Each call sends exactly one request and is never retried.
///
/// # Examples
///
/// ```no_run
/// use videoconvert::{Client, ConnectionSettings, ConvertOptions};
///
/// # async fn example() -> Result<(), videoconvert::Error> {
/// Client::configure(
///     ConnectionSettings::new()
///         .user("test")
///         .password("test")
///         .host("localhost")
///         .port("8886"),
/// );
///
/// let client = Client::new(ConnectionSettings::default())?;
///
/// let submitted = client
///     .convert(&ConvertOptions::new().file_bytes(b"...").filename("video.ogv"))
///     .await?;
/// let key = submitted.key().unwrap_or_default().to_string();
///
/// let status = client.done(&key).await?;
/// println!("Done: {:?}", status.is_done());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    url: Url,
    settings: ConnectionSettings,
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Builds a client from the process-wide defaults overlaid with `options`.
    ///
    /// Fields present in `options` win; absent ones fall back to whatever was
    /// last passed to [`Client::configure`]. No network activity happens here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no host is known or the port is
    /// not a number.
    pub fn new(options: ConnectionSettings) -> Result<Self> {
        ClientBuilder::new().settings(options).build()
    }

    /// Sets the process-wide defaults used by [`Client::new`].
    ///
    /// See [`config::configure`].
    pub fn configure(settings: ConnectionSettings) {
        config::configure(settings);
    }

    /// The settings this client resolved at construction.
    pub fn settings(&self) -> &ConnectionSettings {
        &self.inner.settings
    }

    /// The URL every request is sent to.
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    /// Submits a video for conversion.
    ///
    /// Sends `POST /` with the body built by
    /// [`ConversionRequest::from_options`] and returns the node's JSON,
    /// conventionally holding the key of the new conversion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameters`] without touching the network if
    /// `options` holds no complete video source. Otherwise any error from
    /// the status mapping in [`Error::from_response`] or the transport.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use videoconvert::{Client, ConnectionSettings, ConvertOptions};
    ///
    /// # async fn example() -> Result<(), videoconvert::Error> {
    /// let client = Client::new(ConnectionSettings::new().host("localhost").port("8886"))?;
    ///
    /// let options = ConvertOptions::new()
    ///     .video_link("http://host/video.ogv")
    ///     .callback("http://cb")
    ///     .verb("PUT");
    /// let response = client.convert(&options).await?;
    /// println!("Submitted as {:?}", response.key());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn convert(&self, options: &ConvertOptions) -> Result<Response> {
        let request = ConversionRequest::from_options(options)?;
        tracing::debug!(
            source = request.kind(),
            callback = request.callback.as_deref(),
            "Submitting video for conversion"
        );
        self.call(Method::POST, &request).await
    }

    /// Asks the node whether the conversion identified by `key` is finished.
    ///
    /// Sends `GET /` with `{"key": key}` as body and returns the node's JSON,
    /// conventionally holding a `done` flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] for an unknown key, or any other error
    /// from the status mapping or the transport.
    pub async fn done(&self, key: &str) -> Result<Response> {
        tracing::debug!(key = key, "Checking conversion status");
        self.call(Method::GET, &StatusRequest::new(key)).await
    }

    /// Sends one request and interprets its response.
    async fn call<Req, Res>(&self, method: Method, body: &Req) -> Result<Response<Res>>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let start_time = Instant::now();
        let response = self.execute_request(method, body).await?;
        self.parse_response(response, start_time).await
    }

    /// Executes a single request.
    async fn execute_request<Req>(&self, method: Method, body: &Req) -> Result<reqwest::Response>
    where
        Req: Serialize,
    {
        let url = self.inner.url.clone();

        tracing::debug!(
            method = %method,
            url = %url,
            "Executing HTTP request"
        );

        let mut request = self.inner.http_client.request(method, url);

        if let Some(user) = &self.inner.settings.user {
            request = request.basic_auth(user, self.inner.settings.password.as_ref());
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let json =
            serde_json::to_vec(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
        request = request
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(json);

        request
            .send()
            .await
            .map_err(|e| Error::from_transport(e, self.inner.url.as_str()))
    }

    /// Maps the status to a typed error or parses the body as JSON.
    async fn parse_response<Res>(
        &self,
        response: reqwest::Response,
        start_time: Instant,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response
            .text()
            .await
            .map_err(|e| Error::from_transport(e, self.inner.url.as_str()))?;
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        if let Some(error) = Error::from_response(status, &raw_body) {
            tracing::warn!(
                status = status.as_u16(),
                response = %raw_body,
                error = %error,
                "Conversion node reported an error"
            );
            return Err(error);
        }

        match serde_json::from_str::<Res>(&raw_body) {
            Ok(data) => Ok(Response::new(data, raw_body, status, headers, latency)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %raw_body,
                    "Failed to deserialize response"
                );

                Err(Error::DeserializationFailed {
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                    status,
                })
            }
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.inner.url.as_str())
            .field("user", &self.inner.settings.user)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```
/// use videoconvert::{ClientBuilder, ConnectionSettings};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), videoconvert::Error> {
/// let defaults = ConnectionSettings::new()
///     .user("test")
///     .password("test")
///     .host("localhost")
///     .port("8886");
///
/// let client = ClientBuilder::new()
///     .defaults(defaults)
///     .port("9000")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// assert_eq!(client.url().as_str(), "http://localhost:9000/");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    defaults: Option<ConnectionSettings>,
    options: ConnectionSettings,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `defaults` instead of the process-wide defaults.
    pub fn defaults(mut self, defaults: ConnectionSettings) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Replaces every per-client option at once.
    pub fn settings(mut self, options: ConnectionSettings) -> Self {
        self.options = options;
        self
    }

    /// Sets the user, overriding the defaults.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.options.user = Some(user.into());
        self
    }

    /// Sets the password, overriding the defaults.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.options.password = Some(password.into());
        self
    }

    /// Sets the host, overriding the defaults.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.options.host = Some(host.into());
        self
    }

    /// Sets the port, overriding the defaults.
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.options.port = Some(port.into());
        self
    }

    /// Sets a per-request timeout. Without one the transport's defaults apply.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no host is known after merging, if the port is
    /// not a valid number, or if the host does not form a valid URL.
    pub fn build(self) -> Result<Client> {
        let defaults = self.defaults.unwrap_or_else(config::current_settings);
        let settings = defaults.merge(&self.options);
        let url = node_url(&settings)?;

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(url = %url, "Built conversion client");

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                url,
                settings,
                timeout: self.timeout,
            }),
        })
    }
}

/// Resolves the URL of the node's root path.
fn node_url(settings: &ConnectionSettings) -> Result<Url> {
    let host = settings
        .host
        .as_deref()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| Error::Configuration("Host is required".to_string()))?;

    let mut url = if host.contains("://") {
        Url::parse(host)?
    } else {
        Url::parse(&format!("http://{}", host))?
    };

    if let Some(port) = &settings.port {
        let port = port
            .parse::<u16>()
            .map_err(|e| Error::Configuration(format!("Invalid port {:?}: {}", port, e)))?;
        url.set_port(Some(port))
            .map_err(|_| Error::Configuration(format!("Cannot set a port on {}", host)))?;
    }

    url.set_path("/");
    url.set_query(None);
    Ok(url)
}
