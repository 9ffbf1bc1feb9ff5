//! Stub registration and management.

use crate::account::SimulatedAccount;
use crate::endpoint::{Endpoint, FormParams};
use crate::matcher::{ApiRequest, Matcher, RequestMatcher};
use crate::responder::{Producer, ResponseBody};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// A received request with metadata.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    /// HTTP method, e.g. "POST".
    pub method: String,
    /// Full request path.
    pub path: String,
    /// The endpoint the path resolved to, if any.
    pub endpoint: Option<Endpoint>,
    /// Decoded query parameters.
    pub query: BTreeMap<String, String>,
    /// Decoded form body fields.
    pub form: FormParams,
    /// Whether a stub answered the request.
    pub matched: bool,
    /// When the request was received (relative to server start).
    pub timestamp: std::time::Duration,
}

impl ReceivedRequest {
    pub(crate) fn from_api_request(
        request: &ApiRequest,
        matched: bool,
        start_time: Instant,
    ) -> Self {
        ReceivedRequest {
            method: request.method.to_string(),
            path: request.path.clone(),
            endpoint: request.endpoint.clone(),
            query: request.query.clone(),
            form: request.form.clone(),
            matched,
            timestamp: start_time.elapsed(),
        }
    }

    /// Short `METHOD path` description.
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// A bound stub: a request predicate paired with a response producer.
pub(crate) struct StubRule {
    matcher: RequestMatcher,
    producer: Producer,
    /// Number of times this stub has answered.
    match_count: AtomicU32,
}

impl StubRule {
    pub fn new(matcher: RequestMatcher, producer: Producer) -> Self {
        StubRule {
            matcher,
            producer,
            match_count: AtomicU32::new(0),
        }
    }

    pub fn matches(&self, request: &ApiRequest) -> bool {
        self.matcher.matches(request)
    }

    /// Generate a response for the given request and increment match count.
    pub fn respond(&self, request: &ApiRequest, account: &SimulatedAccount) -> ResponseBody {
        self.match_count.fetch_add(1, Ordering::SeqCst);
        self.producer.respond(request, account)
    }

    pub fn match_count(&self) -> u32 {
        self.match_count.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for StubRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubRule")
            .field("matcher", &self.matcher)
            .field("producer", &self.producer)
            .field("match_count", &self.match_count())
            .finish()
    }
}

/// Registry of stubs, one per endpoint key.
///
/// Binding a key that already holds a stub replaces it, so a request only
/// ever sees the latest arrangement for its endpoint.
pub(crate) struct StubRegistry {
    account: Arc<SimulatedAccount>,
    rules: RwLock<BTreeMap<Endpoint, Arc<StubRule>>>,
    received_requests: RwLock<Vec<ReceivedRequest>>,
    start_time: Instant,
}

impl StubRegistry {
    pub fn new(account: Arc<SimulatedAccount>) -> Self {
        StubRegistry {
            account,
            rules: RwLock::new(BTreeMap::new()),
            received_requests: RwLock::new(Vec::new()),
            start_time: Instant::now(),
        }
    }

    pub fn account(&self) -> &SimulatedAccount {
        &self.account
    }

    /// Bind a stub, superseding any previous stub for the same endpoint.
    pub async fn bind(&self, matcher: RequestMatcher, producer: Producer) {
        let endpoint = matcher.endpoint().clone();
        let rule = Arc::new(StubRule::new(matcher, producer));
        let previous = self.rules.write().await.insert(endpoint.clone(), rule);
        match previous {
            Some(old) => tracing::debug!(
                "Replaced stub for {} (answered {} time(s))",
                endpoint,
                old.match_count()
            ),
            None => tracing::debug!("Bound stub for {}", endpoint),
        }
    }

    /// Find the stub for the request's endpoint and generate a response.
    /// Also records the request.
    pub async fn find_response(&self, request: &ApiRequest) -> Option<ResponseBody> {
        let rule = match &request.endpoint {
            Some(endpoint) => self.rules.read().await.get(endpoint).cloned(),
            None => None,
        };
        let response = rule
            .filter(|rule| rule.matches(request))
            .map(|rule| rule.respond(request, &self.account));

        let received =
            ReceivedRequest::from_api_request(request, response.is_some(), self.start_time);
        self.received_requests.write().await.push(received);

        response
    }

    /// Number of stubs currently bound.
    pub async fn len(&self) -> usize {
        self.rules.read().await.len()
    }

    /// Get all received requests.
    pub async fn received_requests(&self) -> Vec<ReceivedRequest> {
        let requests = self.received_requests.read().await;
        requests.clone()
    }

    /// Requests that no stub answered.
    pub async fn unmatched_requests(&self) -> Vec<ReceivedRequest> {
        let requests = self.received_requests.read().await;
        requests.iter().filter(|r| !r.matched).cloned().collect()
    }

    /// Clear all bound stubs.
    pub async fn clear(&self) {
        let mut rules = self.rules.write().await;
        rules.clear();
    }

    /// Clear all received requests.
    pub async fn clear_received_requests(&self) {
        let mut requests = self.received_requests.write().await;
        requests.clear();
    }
}
