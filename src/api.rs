//! Client for the SmartReader REST API.
//!
//! Uses reqwest for transport. Views and the readiness poller only see the
//! [`SummaryApi`] trait so they can run against any backend.

use crate::config::Config;
use crate::summary::{
    AnswerRequest, QuestionAnswer, ServerStatus, SubmissionRequest, SummarizeResponse, Summary,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("smartreader/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status
    #[error("server returned {status}{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Server { status: u16, message: Option<String> },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid API URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Whether this is a connectivity failure rather than a server answer
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Decode(_))
    }

    /// The server-provided error message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// The backend operations the client uses.
#[async_trait]
pub trait SummaryApi: Send + Sync {
    /// `GET /status`
    async fn status(&self) -> Result<ServerStatus, ApiError>;
    /// `POST /summarize`
    async fn summarize(&self, request: &SubmissionRequest) -> Result<SummarizeResponse, ApiError>;
    /// `GET /summaries`
    async fn summaries(&self) -> Result<Vec<Summary>, ApiError>;
    /// `GET /summaries/{id}`
    async fn summary(&self, id: &str) -> Result<Summary, ApiError>;
    /// `POST /answer`
    async fn answer(&self, request: &AnswerRequest) -> Result<QuestionAnswer, ApiError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct SummaryList {
    #[serde(default)]
    summaries: Vec<Summary>,
}

/// [`SummaryApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    /// Create a client for the API rooted at `base`
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ApiError> {
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base.to_string()));
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { client, base })
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let base = config
            .api_url()
            .map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;
        Self::new(base, config.request_timeout())
    }

    /// Append path segments to the base URL. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        log::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        decode(response).await
    }
}

/// Turn a response into `T`, or into `ApiError::Server` carrying the
/// backend's `{error}` message for a non-success status.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        log::warn!("request failed with {}: {:?}", status, message);
        return Err(ApiError::Server {
            status: status.as_u16(),
            message,
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl SummaryApi for HttpApi {
    async fn status(&self) -> Result<ServerStatus, ApiError> {
        // Any decodable answer counts, whatever the HTTP status.
        let url = self.endpoint(&["status"]);
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn summarize(&self, request: &SubmissionRequest) -> Result<SummarizeResponse, ApiError> {
        log::info!("submitting {} content for summarisation", request.kind());
        self.post_json(&["summarize"], request).await
    }

    async fn summaries(&self) -> Result<Vec<Summary>, ApiError> {
        let list: SummaryList = self.get_json(&["summaries"]).await?;
        Ok(list.summaries)
    }

    async fn summary(&self, id: &str) -> Result<Summary, ApiError> {
        self.get_json(&["summaries", id]).await
    }

    async fn answer(&self, request: &AnswerRequest) -> Result<QuestionAnswer, ApiError> {
        self.post_json(&["answer"], request).await
    }
}
