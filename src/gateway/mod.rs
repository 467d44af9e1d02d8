//! Fetch Gateway: one timeout-bounded outbound call with uniform error
//! translation.
//!
//! ```text
//! FetchRequest + RequestContext ──→ FetchGateway ──→ Result<JSON, FetchError>
//!                                        │
//!                                  ListShape::decode ──→ FetchResult<T>
//! ```
//!
//! The gateway owns no per-view state. Credentials come in with every call
//! through [`RequestContext`](crate::config::RequestContext).

mod envelope;
mod error;
mod http;
mod request;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::RequestContext;

pub use envelope::{decode_entity, FetchResult, ListShape};
pub use error::FetchError;
pub use http::HttpGateway;
pub use request::{FetchRequest, FormPart, MultipartForm, RequestBody};

/// A single request/response transform against the backend.
///
/// Implementations must never retry: every failure is returned to the
/// caller, which decides whether to offer a retry control.
#[async_trait]
pub trait FetchGateway: Send + Sync {
    /// Issue `request` with the credential carried by `ctx`.
    ///
    /// # Returns
    /// * `Ok(Value)` - Parsed JSON body (`Value::Null` for an empty body)
    /// * `Err(FetchError)` - Timeout, 401, non-2xx, transport or decode failure
    async fn fetch(&self, request: FetchRequest, ctx: &RequestContext) -> Result<Value, FetchError>;
}
