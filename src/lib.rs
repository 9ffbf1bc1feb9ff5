//! # twilio-mock
//!
//! A deterministic mock of the Twilio REST API for testing code that sends
//! messages and manages phone numbers, without network access or real
//! credentials.
//!
//! ## Example
//!
//! ```no_run
//! use twilio_mock::{AvailableNumbers, MessageAttributes, MessageStatus, MockTwilioServer};
//!
//! #[tokio::test]
//! async fn test_send_sms() {
//!     let server = MockTwilioServer::start().await.unwrap();
//!
//!     server.stub_create_message().await;
//!     server
//!         .stub_available_numbers(AvailableNumbers::new().area_code("123"))
//!         .await
//!         .unwrap();
//!
//!     // Point your Twilio client at server.url() with server.credentials(),
//!     // then assert on what it created.
//!     let messages = server.messages();
//! }
//! ```

pub mod account;
pub mod endpoint;
pub mod error;
pub mod matcher;
pub mod mock;
pub mod number;
pub mod resource;
pub mod responder;
pub mod server;
pub mod store;

// Re-exports for convenience
pub use account::Credentials;
pub use endpoint::{BodyParams, Endpoint, FormParams};
pub use error::{Error, Result};
pub use matcher::Matcher;
pub use mock::ReceivedRequest;
pub use number::NumberGenerator;
pub use resource::{IncomingPhoneNumber, Message, MessageStatus, Sid};
pub use responder::{AvailableNumbers, MessageAttributes, NumberAttributes};
pub use server::{MockTwilioServer, MockTwilioServerBuilder};
pub use store::ResourceStore;
