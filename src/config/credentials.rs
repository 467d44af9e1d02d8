//! Credentials attached to backend calls.
//!
//! A credential is always handed to the gateway explicitly, per call,
//! through a [`RequestContext`]. Nothing here reads ambient global state.

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// How a call authenticates against the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Credential {
    /// Public endpoint, nothing attached.
    #[default]
    Anonymous,
    /// Standard `Authorization: Bearer` header.
    Bearer(SecureString),
    /// Raw `Cookie` header forwarded from the browser.
    Cookie(SecureString),
}

impl Credential {
    /// Bearer credential, or `Anonymous` when the token is blank.
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            Credential::Anonymous
        } else {
            Credential::Bearer(SecureString::new(token))
        }
    }

    /// Header name and value to attach, if any.
    pub fn header(&self) -> Option<(&'static str, String)> {
        match self {
            Credential::Anonymous => None,
            Credential::Bearer(token) => Some(("Authorization", format!("Bearer {}", token.expose()))),
            Credential::Cookie(cookie) if cookie.is_empty() => None,
            Credential::Cookie(cookie) => Some(("Cookie", cookie.expose().to_string())),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Credential::Anonymous)
    }
}

/// Per-call request context.
///
/// Scoped to one view (or one relayed request); cloned into every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub credential: Credential,
}

impl RequestContext {
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}
