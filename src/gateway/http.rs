use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tokio::time::timeout;

use async_trait::async_trait;

use crate::config::{BackendConfig, RequestContext};
use crate::gateway::error::FetchError;
use crate::gateway::request::{FetchRequest, FormPart, MultipartForm, RequestBody};
use crate::gateway::FetchGateway;

const TIMEOUT_GRACE: Duration = Duration::from_millis(250);

/// Gateway that talks to the real backend over HTTP.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    default_timeout: Duration,
}

impl HttpGateway {
    pub fn new(config: &BackendConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .build()
            .map_err(|e| FetchError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_timeout: Duration::from_secs(config.timeout_seconds as u64),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, FetchError> {
        let raw = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        let mut url = Url::parse(&raw)
            .map_err(|e| FetchError::InvalidRequest(format!("invalid URL '{}': {}", raw, e)))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    async fn send(&self, request: FetchRequest, ctx: &RequestContext, budget: Duration) -> Result<Value, FetchError> {
        let url = self.url(&request.path, &request.query)?;
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .timeout(budget)
            .header(ACCEPT, "application/json");

        if let Some((name, value)) = ctx.credential.header() {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(form) => builder.multipart(into_form(form)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, budget, "request failed"))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, budget, "failed to read response body"))?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized);
        }

        if !status.is_success() {
            return Err(FetchError::ServerError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_body(&body)
    }
}

#[async_trait]
impl FetchGateway for HttpGateway {
    async fn fetch(&self, request: FetchRequest, ctx: &RequestContext) -> Result<Value, FetchError> {
        let budget = request.timeout.unwrap_or(self.default_timeout);
        let method = request.method.clone();
        let path = request.path.clone();

        tracing::debug!(%method, %path, page = ?request.query_value("page"), "backend call");

        // reqwest enforces the budget itself; the outer timer is a backstop.
        // Dropping the future on expiry cancels the in-flight request.
        let result = match timeout(budget + TIMEOUT_GRACE, self.send(request, ctx, budget)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                millis: budget.as_millis() as u64,
            }),
        };

        if let Err(ref e) = result {
            tracing::warn!(%method, %path, error = %e, "backend call failed");
        }

        result
    }
}

fn transport_error(err: reqwest::Error, budget: Duration, context: &str) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            millis: budget.as_millis() as u64,
        }
    } else {
        FetchError::Network(format!("{}: {}", context, err))
    }
}

fn into_form(form: MultipartForm) -> Result<Form, FetchError> {
    let mut out = Form::new();
    for part in form.parts {
        out = match part {
            FormPart::Text { name, value } => out.text(name, value),
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let mut file = Part::bytes(bytes).file_name(file_name);
                if let Some(ct) = content_type {
                    file = file
                        .mime_str(&ct)
                        .map_err(|e| FetchError::InvalidRequest(format!("bad content type '{}': {}", ct, e)))?;
                }
                out.part(name, file)
            }
        };
    }
    Ok(out)
}

/// Empty bodies (e.g. `204` on delete) decode as `null`.
fn parse_body(bytes: &[u8]) -> Result<Value, FetchError> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| FetchError::Decode(e.to_string()))
}

/// `message` (or `error`) field of a JSON error body.
fn error_message(bytes: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(bytes).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
