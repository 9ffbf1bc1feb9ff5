//! Request matching logic.

use crate::account::Credentials;
use crate::endpoint::{BodyParams, Endpoint, FormParams};
use axum::http::Method;
use std::collections::BTreeMap;

/// A parsed API request that can be matched against.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// The endpoint the path resolves to under the configured account.
    pub endpoint: Option<Endpoint>,
    /// URL-decoded query parameters.
    pub query: BTreeMap<String, String>,
    /// URL-decoded form body fields, repeated keys kept.
    pub form: FormParams,
    /// Headers with lower-cased names.
    pub headers: BTreeMap<String, String>,
    /// Basic-auth credentials, if the request carried any.
    pub credentials: Option<Credentials>,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Short `METHOD path` description used in logs and errors.
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Trait for matching requests.
pub trait Matcher: Send + Sync {
    /// Check if this matcher matches the given request.
    fn matches(&self, request: &ApiRequest) -> bool;
}

/// The predicate half of a stub: endpoint, credentials, headers and body.
#[derive(Debug, Clone)]
pub struct RequestMatcher {
    endpoint: Endpoint,
    credentials: Credentials,
    headers: Vec<(String, String)>,
    /// Expected form fields; `None` accepts any body.
    body: Option<BodyParams>,
}

impl RequestMatcher {
    pub fn new(endpoint: Endpoint, credentials: Credentials) -> Self {
        RequestMatcher {
            endpoint,
            credentials,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Require a header with exactly this value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    /// Require these form fields.
    pub fn with_body(mut self, body: BodyParams) -> Self {
        self.body = Some(body);
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl Matcher for RequestMatcher {
    fn matches(&self, request: &ApiRequest) -> bool {
        if request.method != self.endpoint.method() {
            return false;
        }
        if request.endpoint.as_ref() != Some(&self.endpoint) {
            return false;
        }
        if request.credentials.as_ref() != Some(&self.credentials) {
            tracing::debug!("Credentials mismatch for {}", request.describe());
            return false;
        }
        for (name, value) in &self.headers {
            if request.header(name) != Some(value.as_str()) {
                tracing::debug!("Header {} mismatch for {}", name, request.describe());
                return false;
            }
        }
        if let Some(body) = &self.body {
            if !body.matches(&request.form) {
                tracing::debug!("Body mismatch for {}", request.describe());
                return false;
            }
        }
        true
    }
}
