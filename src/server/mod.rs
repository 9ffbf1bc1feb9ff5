//! Mock Twilio API server and its public stubbing surface.

mod http;

use crate::account::{Credentials, SimulatedAccount};
use crate::endpoint::{BodyParams, Endpoint};
use crate::matcher::RequestMatcher;
use crate::mock::{ReceivedRequest, StubRegistry};
use crate::number::NumberGenerator;
use crate::resource::{IncomingPhoneNumber, Message, Sid};
use crate::responder::{AvailableNumbers, MessageAttributes, NumberAttributes, Producer};
use crate::{Error, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;

/// A mock Twilio REST API server for testing.
///
/// Point the client under test at [`MockTwilioServer::url`] and arrange
/// stubs with the `stub_*`, `set_*` and `fetch_*` methods. Requests that no
/// stub answers get a 404 and are reported by [`MockTwilioServer::verify`].
pub struct MockTwilioServer {
    /// HTTP server address.
    http_addr: SocketAddr,
    /// Stub registry.
    registry: Arc<StubRegistry>,
    /// Extra headers every stub requires.
    required_headers: Vec<(String, String)>,
    /// Shutdown signal sender.
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockTwilioServer {
    /// Start a new mock server on a random available port.
    pub async fn start() -> Result<Self> {
        Self::builder().start().await
    }

    /// Create a builder for configuring the server.
    pub fn builder() -> MockTwilioServerBuilder {
        MockTwilioServerBuilder::default()
    }

    /// Get the URL of the HTTP server; use it in place of `https://api.twilio.com`.
    pub fn url(&self) -> String {
        format!("http://{}", self.http_addr)
    }

    /// Get the account-scoped base URL all endpoints live under.
    pub fn api_base_url(&self) -> String {
        format!("{}{}", self.url(), self.credentials().base_path())
    }

    /// Get the HTTP server address.
    pub fn http_addr(&self) -> SocketAddr {
        self.http_addr
    }

    /// Credentials every request must authenticate with.
    pub fn credentials(&self) -> &Credentials {
        &self.account().credentials
    }

    /// The generator the server draws numbers and SIDs from.
    pub fn number_generator(&self) -> &NumberGenerator {
        &self.account().generator
    }

    fn account(&self) -> &SimulatedAccount {
        self.registry.account()
    }

    fn matcher(&self, endpoint: Endpoint) -> RequestMatcher {
        self.required_headers.iter().fold(
            RequestMatcher::new(endpoint, self.credentials().clone()),
            |matcher, (name, value)| matcher.with_header(name.clone(), value.clone()),
        )
    }

    // =========================================================================
    // Stubs
    // =========================================================================

    /// Stub the available local numbers list.
    ///
    /// Each request gets one freshly generated test number, or an empty list
    /// when [`AvailableNumbers::empty_list`] is set.
    pub async fn stub_available_numbers(&self, options: AvailableNumbers) -> Result<()> {
        let country = options.validated_country()?;
        let matcher = self.matcher(Endpoint::available_numbers(&country));
        let producer = Producer::AvailableNumbers {
            empty_list: options.empty_list,
            country,
            area_code: options.area_code,
        };
        self.registry.bind(matcher, producer).await;
        Ok(())
    }

    /// Stub message creation for any body.
    pub async fn stub_create_message(&self) {
        let matcher = self.matcher(Endpoint::CreateMessage);
        self.registry.bind(matcher, Producer::CreateMessage).await;
    }

    /// Stub message creation for requests whose form fields are exactly
    /// `body`, or include it when `body` is [`BodyParams::partial`].
    ///
    /// Every matching request stores a new `queued` message, see
    /// [`MockTwilioServer::messages`].
    pub async fn stub_create_message_with(&self, body: BodyParams) {
        let matcher = self.matcher(Endpoint::CreateMessage).with_body(body);
        self.registry.bind(matcher, Producer::CreateMessage).await;
    }

    /// Stub number purchase for any body.
    ///
    /// The request must carry `PhoneNumber` or `AreaCode`; an `AreaCode`
    /// purchase is answered with a freshly generated number in that area.
    pub async fn stub_buy_number(&self) {
        let matcher = self.matcher(Endpoint::BuyNumber);
        self.registry.bind(matcher, Producer::BuyNumber).await;
    }

    /// Stub number purchase for requests whose form fields match `body`.
    pub async fn stub_buy_number_with(&self, body: BodyParams) {
        let matcher = self.matcher(Endpoint::BuyNumber).with_body(body);
        self.registry.bind(matcher, Producer::BuyNumber).await;
    }

    /// Seed the account's incoming numbers and stub their list endpoint.
    ///
    /// Replaces any previously seeded list.
    pub async fn set_incoming_number_list<I, S>(&self, numbers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let generator = self.number_generator();
        let numbers: Vec<IncomingPhoneNumber> = numbers
            .into_iter()
            .map(|number| IncomingPhoneNumber {
                sid: generator.incoming_number_sid(),
                phone_number: number.into(),
            })
            .collect();
        tracing::debug!("Seeding {} incoming number(s)", numbers.len());
        self.account().store.write().set_incoming_numbers(numbers);

        let matcher = self.matcher(Endpoint::ListIncomingNumbers);
        self.registry.bind(matcher, Producer::IncomingNumbers).await;
    }

    /// Make `sid` fetchable as a message with exactly these attributes.
    pub async fn fetch_message(&self, sid: &str, attributes: MessageAttributes) -> Result<()> {
        let sid = Sid::parse(sid)?;
        let message = attributes.into_message(sid.clone())?;
        self.account().store.write().upsert_fetchable_message(message);

        let matcher = self.matcher(Endpoint::FetchMessage { sid: sid.clone() });
        self.registry.bind(matcher, Producer::FetchMessage { sid }).await;
        Ok(())
    }

    /// Make `sid` fetchable as an incoming number with exactly these attributes.
    pub async fn fetch_number(&self, sid: &str, attributes: NumberAttributes) -> Result<()> {
        let sid = Sid::parse(sid)?;
        let number = attributes.into_number(sid.clone())?;
        self.account().store.write().upsert_fetchable_number(number);

        let matcher = self.matcher(Endpoint::FetchNumber { sid: sid.clone() });
        self.registry.bind(matcher, Producer::FetchNumber { sid }).await;
        Ok(())
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Messages created so far, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.account().store.read().messages().to_vec()
    }

    pub fn message_count(&self) -> usize {
        self.account().store.read().message_count()
    }

    /// The seeded incoming number list.
    pub fn incoming_numbers(&self) -> Vec<IncomingPhoneNumber> {
        self.account().store.read().incoming_numbers().to_vec()
    }

    /// Number of stubs currently bound.
    pub async fn stub_count(&self) -> usize {
        self.registry.len().await
    }

    /// Get all received requests.
    pub async fn received_requests(&self) -> Vec<ReceivedRequest> {
        self.registry.received_requests().await
    }

    /// Requests that no stub answered.
    pub async fn unmatched_requests(&self) -> Vec<ReceivedRequest> {
        self.registry.unmatched_requests().await
    }

    /// Clear all received requests.
    pub async fn clear_received_requests(&self) {
        self.registry.clear_received_requests().await;
    }

    /// Fail if any request reached the server without a matching stub.
    pub async fn verify(&self) -> Result<()> {
        let unmatched = self.unmatched_requests().await;
        if unmatched.is_empty() {
            Ok(())
        } else {
            Err(Error::UnmatchedRequests(
                unmatched.iter().map(ReceivedRequest::describe).collect(),
            ))
        }
    }

    /// Drop every stub, stored resource and received request.
    pub async fn reset(&self) {
        self.registry.clear().await;
        self.registry.clear_received_requests().await;
        self.account().store.write().clear();
        self.number_generator().reset();
    }

    /// Shutdown the server.
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockTwilioServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Builder for configuring a mock Twilio server.
#[derive(Default)]
pub struct MockTwilioServerBuilder {
    http_port: Option<u16>,
    credentials: Option<Credentials>,
    required_headers: Vec<(String, String)>,
    seed: Option<u64>,
}

impl MockTwilioServerBuilder {
    /// Set a specific port for the HTTP server.
    pub fn http_port(mut self, port: u16) -> Self {
        self.http_port = Some(port);
        self
    }

    /// Set the account SID and auth token requests must carry.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Require a header on every stubbed request.
    pub fn require_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.required_headers.push((name.into(), value.into()));
        self
    }

    /// Seed the random source used for numbers and SIDs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start the server with the configured options.
    pub async fn start(self) -> Result<MockTwilioServer> {
        let generator = match self.seed {
            Some(seed) => NumberGenerator::seeded(seed),
            None => NumberGenerator::new(),
        };
        let credentials = self.credentials.unwrap_or_default();
        let account = Arc::new(SimulatedAccount::new(credentials, generator));
        let registry = Arc::new(StubRegistry::new(account));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let http_addr = format!("127.0.0.1:{}", self.http_port.unwrap_or(0));
        let listener = tokio::net::TcpListener::bind(&http_addr).await?;
        let http_addr = listener.local_addr()?;
        tracing::debug!("Mock Twilio server listening on {}", http_addr);

        let http_registry = registry.clone();
        tokio::spawn(async move {
            http::run_http_server(listener, http_registry, shutdown_rx).await;
        });

        Ok(MockTwilioServer {
            http_addr,
            registry,
            required_headers: self.required_headers,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}
