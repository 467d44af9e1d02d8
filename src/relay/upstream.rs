use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde_json::Value;
use tokio::time::timeout;

use crate::config::{BackendConfig, Credential};
use crate::relay::error::RelayError;

/// Body of a relayed request.
#[derive(Debug, Clone, Default)]
pub enum UpstreamBody {
    #[default]
    Empty,
    Json(Value),
    /// Bytes forwarded untouched with the browser's content type
    /// (multipart uploads keep their boundary this way).
    Raw { bytes: Bytes, content_type: Option<String> },
}

/// One call to the backend on behalf of the browser.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: UpstreamBody,
    pub credential: Credential,
    /// Read a non-JSON answer as `null` instead of failing.
    pub lenient: bool,
}

impl UpstreamRequest {
    pub fn new(method: Method, path: impl Into<String>, credential: Credential) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: UpstreamBody::Empty,
            credential,
            lenient: false,
        }
    }

    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn body(mut self, body: UpstreamBody) -> Self {
        self.body = body;
        self
    }

    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }
}

/// Backend status plus parsed JSON body.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub struct UpstreamClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &BackendConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to build upstream client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.timeout_seconds as u64),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn forward(&self, req: UpstreamRequest) -> Result<UpstreamResponse, RelayError> {
        let method = req.method.clone();
        let path = req.path.clone();

        // Execute the request with timeout
        let result = timeout(self.request_timeout, self.do_forward(req)).await;

        let response = match result {
            Ok(response) => response?,
            Err(_) => {
                return Err(RelayError::RequestTimeout {
                    millis: self.request_timeout.as_millis() as u64,
                })
            }
        };

        tracing::debug!(%method, %path, status = response.status.as_u16(), "relayed");
        Ok(response)
    }

    async fn do_forward(&self, req: UpstreamRequest) -> Result<UpstreamResponse, RelayError> {
        let lenient = req.lenient;
        let raw = format!("{}{}", self.base_url, req.path);
        let mut url = Url::parse(&raw).map_err(|e| RelayError::Internal(format!("Invalid backend URL '{}': {}", raw, e)))?;
        if !req.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &req.query {
                pairs.append_pair(key, value);
            }
        }

        let mut builder = self
            .client
            .request(req.method, url)
            .header(ACCEPT, "application/json");

        if let Some((name, value)) = req.credential.header() {
            builder = builder.header(name, value);
        }

        builder = match req.body {
            UpstreamBody::Empty => builder,
            UpstreamBody::Json(body) => builder.json(&body),
            UpstreamBody::Raw { bytes, content_type } => {
                let builder = match content_type {
                    Some(ct) => builder.header(CONTENT_TYPE, ct),
                    None => builder,
                };
                builder.body(bytes)
            }
        };

        let upstream_resp = builder
            .send()
            .await
            .map_err(|e| RelayError::ConnectionError { source: e })?;

        let status = StatusCode::from_u16(upstream_resp.status().as_u16())
            .map_err(|e| RelayError::InvalidUpstreamBody(e.to_string()))?;

        let body_bytes = upstream_resp
            .bytes()
            .await
            .map_err(|e| RelayError::Internal(format!("Failed to read response body: {}", e)))?;

        let body = if body_bytes.iter().all(|b| b.is_ascii_whitespace()) {
            Value::Null
        } else {
            match serde_json::from_slice(&body_bytes) {
                Ok(body) => body,
                Err(e) if lenient => {
                    tracing::debug!(status = status.as_u16(), error = %e, "non-JSON backend body read as null");
                    Value::Null
                }
                Err(e) => return Err(RelayError::InvalidUpstreamBody(e.to_string())),
            }
        };

        Ok(UpstreamResponse { status, body })
    }
}
