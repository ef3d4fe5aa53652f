//! reqwest client for the simulation engine's HTTP API.
//!
//! | Call | Port |
//! |------|------|
//! | `GET {base}/presets` | [`CatalogGateway::presets`] |
//! | `GET {base}/agents` | [`CatalogGateway::agents`] |
//! | `POST {base}/simulate` | [`SimulationFeed::open`] (event stream) |
//!
//! Catalog calls are bounded by the request timeout. The event stream is
//! not: a run lasts as long as the engine keeps talking, and ends when the
//! returned stream is dropped.

use super::error::{HttpError, error_detail};
use crate::config::FileServerConfig;
use crate::sse::decode_frames;
use async_trait::async_trait;
use bargaining_application::{CatalogError, CatalogGateway, FeedError, FrameStream, SimulationFeed};
use bargaining_domain::{AgentIdentity, ScenarioPreset, SimulationRequest};
use futures::StreamExt;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

const EVENT_STREAM: &str = "text/event-stream";

/// HTTP adapter implementing both the feed and the catalog ports.
#[derive(Debug, Clone)]
pub struct HttpSimulationClient {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
}

impl HttpSimulationClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, HttpError> {
        Self::from_config(&FileServerConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    pub fn from_config(config: &FileServerConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(concat!("bargaining-observer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(HttpError::Build)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(HttpError::Connection)?;
        let response = check_status(response).await?;

        let body = response.bytes().await.map_err(HttpError::Read)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Turn a non-2xx response into [`HttpError::Status`] carrying the body text.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, HttpError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(HttpError::Status {
        status: status.as_u16(),
        body: error_detail(&body),
    })
}

#[async_trait]
impl SimulationFeed for HttpSimulationClient {
    async fn open(&self, request: &SimulationRequest) -> Result<FrameStream, FeedError> {
        request.validate()?;

        let url = self.url("simulate");
        info!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static(EVENT_STREAM))
            .json(request)
            .send()
            .await
            .map_err(HttpError::Connection)?;
        let response = check_status(response).await?;

        if let Some(content_type) = response.headers().get(reqwest::header::CONTENT_TYPE)
            && !content_type.as_bytes().starts_with(EVENT_STREAM.as_bytes())
        {
            debug!("Unexpected content type for event stream: {:?}", content_type);
        }

        let bytes = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| FeedError::from(HttpError::Read(e))));

        Ok(decode_frames(bytes).boxed())
    }
}

#[async_trait]
impl CatalogGateway for HttpSimulationClient {
    async fn presets(&self) -> Result<Vec<ScenarioPreset>, CatalogError> {
        Ok(self.get_json("presets").await?)
    }

    async fn agents(&self) -> Result<Vec<AgentIdentity>, CatalogError> {
        Ok(self.get_json("agents").await?)
    }
}
