// HTTP implementation of the rules API

use crate::config::{ClientConfig, DEFAULT_API_BASE};
use crate::error::{ApiError, Result};
use crate::traits::{ChatRequest, ChatResponse, RulesApi};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;
use umpire_types::{Country, DocumentStat};

const API_KEY_HEADER: &str = "x-api-key";

/// Rules API client (plain reqwest, JSON in and out)
#[derive(Debug, Clone)]
pub struct HttpRulesClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpRulesClient {
    /// Create a client from a config
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let mut builder = Self::builder()
            .base_url(config.base_url)
            .api_key(config.api_key);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    pub fn builder() -> HttpRulesClientBuilder {
        HttpRulesClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Turn a response into `T`, mapping non-2xx to `ApiError::Status`
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_jurisdictions(&self) -> Result<Vec<Country>> {
        let response = self.http_client.get(self.url("jurisdictions")).send().await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl RulesApi for HttpRulesClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        tracing::debug!(
            history_len = request.history.len(),
            country = request.country.as_deref().unwrap_or("-"),
            "Sending chat request"
        );

        let response = self
            .http_client
            .post(self.url("chat"))
            .json(&request)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn health(&self) -> bool {
        match self.http_client.get(self.url("health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                false
            }
        }
    }

    async fn jurisdictions(&self) -> Vec<Country> {
        match self.fetch_jurisdictions().await {
            Ok(countries) => countries,
            Err(e) => {
                tracing::warn!("Failed to load jurisdictions: {}", e);
                Vec::new()
            }
        }
    }

    async fn knowledge_base(&self) -> Result<Vec<DocumentStat>> {
        let response = self
            .http_client
            .get(self.url("knowledge-base"))
            .send()
            .await?;

        Self::decode(response).await
    }
}

#[derive(Debug, Default)]
pub struct HttpRulesClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl HttpRulesClientBuilder {
    /// Defaults to the production deployment
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> anyhow::Result<HttpRulesClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        if base_url.is_empty() {
            return Err(ApiError::InvalidConfig("Base URL is required".to_string()).into());
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        match self.api_key.filter(|k| !k.is_empty()) {
            Some(api_key) => {
                headers.insert(
                    API_KEY_HEADER,
                    HeaderValue::from_str(&api_key).context("Invalid API key format")?,
                );
            }
            None => tracing::warn!("No API key configured; requests may be rejected"),
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("Failed to create HTTP client")?;

        Ok(HttpRulesClient {
            http_client,
            base_url,
        })
    }
}
