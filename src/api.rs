//! One-shot admin calls that are not paginated lists.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::{RequestContext, SecureString};
use crate::filter::{DateRange, Filters};
use crate::gateway::{FetchError, FetchGateway, FetchRequest};
use crate::models::{AdminProfile, BookingStats, Dashboard, ProfileUpdate, Report};

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

#[derive(Deserialize)]
struct AlertsResponse {
    #[serde(default)]
    alerts: Vec<String>,
}

/// Profile answers come as `{ "admin": {...} }` or as the record itself.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileResponse {
    Wrapped { admin: AdminProfile },
    Bare(AdminProfile),
}

impl ProfileResponse {
    fn into_profile(self) -> AdminProfile {
        match self {
            ProfileResponse::Wrapped { admin } | ProfileResponse::Bare(admin) => admin,
        }
    }
}

#[derive(Deserialize)]
struct MessageResponse {
    message: Option<String>,
}

/// Exchange admin credentials for a session token.
///
/// A 401 from the backend means the credentials were wrong and is reported
/// as a `ServerError` carrying the backend's message.
pub async fn login(gateway: &dyn FetchGateway, email: &str, password: &str) -> Result<SecureString, FetchError> {
    let request = FetchRequest::post("/admin/login").json(json!({
        "email": email,
        "password": password,
    }));

    let body = gateway
        .fetch(request, &RequestContext::anonymous())
        .await
        .map_err(|e| match e {
            FetchError::Unauthorized => FetchError::ServerError {
                status: 401,
                message: Some("Login failed".to_string()),
            },
            other => other,
        })?;

    let response: LoginResponse = decode(body)?;
    match response.token {
        Some(token) if !token.is_empty() => Ok(SecureString::new(token)),
        _ => Err(FetchError::Decode("login response has no token".to_string())),
    }
}

/// Typed wrappers for the dashboard, stats, reports and profile endpoints.
#[derive(Clone)]
pub struct AdminApi {
    gateway: Arc<dyn FetchGateway>,
    ctx: RequestContext,
}

impl AdminApi {
    pub fn new(gateway: Arc<dyn FetchGateway>, ctx: RequestContext) -> Self {
        Self { gateway, ctx }
    }

    async fn get<T: DeserializeOwned>(&self, request: FetchRequest) -> Result<T, FetchError> {
        let body = self.gateway.fetch(request, &self.ctx).await?;
        decode(body)
    }

    pub async fn booking_stats(&self) -> Result<BookingStats, FetchError> {
        self.get(FetchRequest::get("/admin/bookings/stats")).await
    }

    pub async fn report(&self, range: &DateRange) -> Result<Report, FetchError> {
        self.get(FetchRequest::get("/admin/reports").query_pairs(range.query_pairs()))
            .await
    }

    pub async fn dashboard(&self) -> Result<Dashboard, FetchError> {
        self.get(FetchRequest::get("/admin/dashboard")).await
    }

    /// Dashboard alert lines. A missing list is no alerts.
    pub async fn alerts(&self) -> Result<Vec<String>, FetchError> {
        let response: AlertsResponse = self.get(FetchRequest::get("/admin/alerts")).await?;
        Ok(response.alerts)
    }

    pub async fn profile(&self) -> Result<AdminProfile, FetchError> {
        let response: ProfileResponse = self.get(FetchRequest::get("/admin/profile")).await?;
        Ok(response.into_profile())
    }

    /// Returns the updated admin record.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<AdminProfile, FetchError> {
        let body = serde_json::to_value(update).map_err(|e| FetchError::InvalidRequest(e.to_string()))?;
        let response: ProfileResponse = self
            .get(FetchRequest::put("/admin/profile").json(body))
            .await?;
        Ok(response.into_profile())
    }

    /// Deletes the signed-in admin account. The token is useless afterwards.
    ///
    /// Returns the backend's confirmation message, if any.
    pub async fn delete_profile(&self) -> Result<Option<String>, FetchError> {
        let body = self
            .gateway
            .fetch(FetchRequest::delete("/admin/update"), &self.ctx)
            .await?;
        if body.is_null() {
            return Ok(None);
        }
        let response: MessageResponse = decode(body)?;
        Ok(response.message)
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, FetchError> {
    serde_json::from_value(body).map_err(|e| FetchError::Decode(e.to_string()))
}
