//! Request descriptors, the HTTP transport and the data fetcher

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// The single endpoint every request is sent to
pub const API_URL: &str = "https://bconomy.net/api/data";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Errors that can occur when fetching data from the API
#[derive(Debug, Error)]
pub enum FetchError {
    /// No API key was configured; raised before any network call
    #[error("API key must be set via --apikey flag, config file, or env var BCONOMYAPI")]
    MissingApiKey,

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned status {status}: {body}")]
    Remote { status: u16, body: String },

    /// The request descriptor could not be encoded as JSON
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body was not the expected JSON
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// A logical API operation: the `type` discriminator plus its parameters.
///
/// Serializes to a flat JSON object, e.g. `{"type":"pet","id":42}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    params: Map<String, Value>,
}

impl RequestDescriptor {
    /// Creates a descriptor for the given request type with no parameters
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: Map::new(),
        }
    }

    /// Adds a parameter, replacing any earlier value under the same key
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// The request type discriminator
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Looks up a parameter value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Encodes the descriptor as the JSON request body
    pub fn to_body(&self) -> Result<Vec<u8>, FetchError> {
        serde_json::to_vec(self).map_err(FetchError::Encode)
    }
}

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one authenticated JSON POST and returns whatever the server answered
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post(
        &self,
        url: &str,
        api_key: &str,
        body: Vec<u8>,
    ) -> Result<TransportResponse, FetchError>;
}

/// [`Transport`] backed by a reqwest client with default settings
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        api_key: &str,
        body: Vec<u8>,
    ) -> Result<TransportResponse, FetchError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(TransportResponse { status, body })
    }
}

/// Client for the bconomy data endpoint
#[derive(Debug, Clone)]
pub struct DataFetcher<T = HttpTransport> {
    transport: T,
    api_key: Option<String>,
    endpoint: String,
}

impl DataFetcher<HttpTransport> {
    /// Create a fetcher using the reqwest transport and the default endpoint
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_transport(HttpTransport::new(), api_key)
    }
}

impl<T: Transport> DataFetcher<T> {
    /// Create a fetcher over a custom transport
    pub fn with_transport(transport: T, api_key: Option<String>) -> Self {
        Self {
            transport,
            api_key,
            endpoint: API_URL.to_string(),
        }
    }

    /// Override the endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends the request and returns the raw response body.
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - Body of a 2xx response
    /// * `Err(FetchError::MissingApiKey)` - No key configured; nothing was sent
    /// * `Err(FetchError::Remote)` - The API answered with a non-2xx status
    /// * `Err(FetchError::Transport)` - The request never completed
    pub async fn fetch(&self, request: &RequestDescriptor) -> Result<Vec<u8>, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(FetchError::MissingApiKey)?;

        let body = request.to_body()?;
        debug!(request_type = request.kind(), endpoint = %self.endpoint, "sending request");

        let response = match self.transport.post(&self.endpoint, api_key, body).await {
            Ok(response) => response,
            Err(e) => {
                warn!(request_type = request.kind(), error = %e, "request failed");
                return Err(e);
            }
        };

        if !response.is_success() {
            warn!(
                request_type = request.kind(),
                status = response.status,
                "API returned an error status"
            );
            return Err(FetchError::Remote {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        debug!(
            request_type = request.kind(),
            bytes = response.body.len(),
            "received response"
        );
        Ok(response.body)
    }

    /// Sends the request and decodes the JSON body into `D`
    pub async fn fetch_json<D: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<D, FetchError> {
        let body = self.fetch(request).await?;
        serde_json::from_slice(&body).map_err(FetchError::Decode)
    }
}
