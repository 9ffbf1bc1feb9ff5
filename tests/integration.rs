//! Integration tests for the mock Twilio server.

use serde_json::Value;
use twilio_mock::{
    AvailableNumbers, BodyParams, Credentials, Error, MessageAttributes, MessageStatus,
    MockTwilioServer, NumberAttributes,
};

/// Minimal stand-in for a Twilio SDK: basic auth, form bodies, JSON replies.
struct TestClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl TestClient {
    fn new(server: &MockTwilioServer) -> Self {
        init_tracing();
        Self::with_credentials(server, server.credentials().clone())
    }

    fn with_credentials(server: &MockTwilioServer, credentials: Credentials) -> Self {
        TestClient {
            http: reqwest::Client::new(),
            base_url: format!("{}/2010-04-01/Accounts/{}", server.url(), credentials.account_sid),
            credentials,
        }
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .basic_auth(&self.credentials.account_sid, Some(&self.credentials.auth_token))
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    async fn post(&self, path: &str, form: &[(&str, &str)]) -> (u16, Value) {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .basic_auth(&self.credentials.account_sid, Some(&self.credentials.auth_token))
            .form(form)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    async fn first_available_number(&self, path: &str) -> String {
        let (status, body) = self.get(path).await;
        assert_eq!(status, 200, "unexpected body: {body}");
        body["available_phone_numbers"][0]["PhoneNumber"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

/// Log mock server events with `RUST_LOG=twilio_mock=debug`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn is_sid(value: &str, prefix: &str) -> bool {
    value.len() == 34
        && value.starts_with(prefix)
        && value[2..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
}

const LOCAL_US: &str = "/AvailablePhoneNumbers/US/Local.json";

// =============================================================================
// Available numbers
// =============================================================================

#[tokio::test]
async fn test_available_number_is_test_number() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_available_numbers(AvailableNumbers::new())
        .await
        .unwrap();

    let number = TestClient::new(&server).first_available_number(LOCAL_US).await;

    assert!(number.contains("150055"), "got {number}");
    assert_eq!(number.len(), 12);
    assert_eq!(&number[5..8], "555");
}

#[tokio::test]
async fn test_available_number_with_requested_area_code() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_available_numbers(AvailableNumbers::new())
        .await
        .unwrap();

    let number = TestClient::new(&server)
        .first_available_number(&format!("{LOCAL_US}?AreaCode=123"))
        .await;

    assert!(number.contains("112355"), "got {number}");
    assert!(number.starts_with("+1123555"));
}

#[tokio::test]
async fn test_available_number_with_stubbed_area_code() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_available_numbers(AvailableNumbers::new().area_code("415"))
        .await
        .unwrap();

    // The arranged area code wins over the request's.
    let number = TestClient::new(&server)
        .first_available_number(&format!("{LOCAL_US}?AreaCode=123"))
        .await;

    assert!(number.starts_with("+1415555"), "got {number}");
}

#[tokio::test]
async fn test_available_number_invalid_requested_area_code() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_available_numbers(AvailableNumbers::new())
        .await
        .unwrap();

    let (status, body) = TestClient::new(&server)
        .get(&format!("{LOCAL_US}?AreaCode=12"))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], 20001);
}

#[tokio::test]
async fn test_available_number_other_country() {
    let server = MockTwilioServer::start().await.unwrap();
    let client = TestClient::new(&server);

    for country in ["BR", "JP", "SE"] {
        server
            .stub_available_numbers(AvailableNumbers::new().country(country))
            .await
            .unwrap();

        let number = client
            .first_available_number(&format!("/AvailablePhoneNumbers/{country}/Local.json"))
            .await;

        assert!(number.contains("150055"), "{country} gave {number}");
    }
}

#[tokio::test]
async fn test_available_numbers_rejects_bad_arrangement() {
    let server = MockTwilioServer::start().await.unwrap();

    let result = server
        .stub_available_numbers(AvailableNumbers::new().area_code("12a"))
        .await;
    assert!(matches!(result, Err(Error::InvalidAreaCode(_))));

    let result = server
        .stub_available_numbers(AvailableNumbers::new().country("ZZ").area_code("1234"))
        .await;
    assert!(matches!(result, Err(Error::InvalidAreaCode(_))));

    assert_eq!(server.stub_count().await, 0);
}

#[tokio::test]
async fn test_available_numbers_are_fresh() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_available_numbers(AvailableNumbers::new())
        .await
        .unwrap();
    let client = TestClient::new(&server);

    let first = client.first_available_number(LOCAL_US).await;
    let second = client.first_available_number(LOCAL_US).await;

    assert_ne!(first, second);
    assert!(first.contains("150055"));
    assert!(second.contains("150055"));
}

#[tokio::test]
async fn test_available_numbers_empty_list() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_available_numbers(AvailableNumbers::new().empty_list())
        .await
        .unwrap();

    let (status, body) = TestClient::new(&server).get(LOCAL_US).await;

    assert_eq!(status, 200);
    assert_eq!(body["available_phone_numbers"], serde_json::json!([]));
}

#[tokio::test]
async fn test_available_numbers_rebinding_supersedes() {
    let server = MockTwilioServer::start().await.unwrap();
    let client = TestClient::new(&server);

    server
        .stub_available_numbers(AvailableNumbers::new().empty_list())
        .await
        .unwrap();
    let (_, body) = client.get(LOCAL_US).await;
    assert_eq!(body["available_phone_numbers"].as_array().unwrap().len(), 0);

    server
        .stub_available_numbers(AvailableNumbers::new())
        .await
        .unwrap();
    let (_, body) = client.get(LOCAL_US).await;
    assert_eq!(body["available_phone_numbers"].as_array().unwrap().len(), 1);
    assert_eq!(server.stub_count().await, 1);
}

#[tokio::test]
async fn test_seeded_servers_generate_same_numbers() {
    let first = MockTwilioServer::builder().seed(7).start().await.unwrap();
    let second = MockTwilioServer::builder().seed(7).start().await.unwrap();
    for server in [&first, &second] {
        server
            .stub_available_numbers(AvailableNumbers::new())
            .await
            .unwrap();
    }

    let a = TestClient::new(&first).first_available_number(LOCAL_US).await;
    let b = TestClient::new(&second).first_available_number(LOCAL_US).await;

    assert_eq!(a, b);
}

// =============================================================================
// Messages
// =============================================================================

#[tokio::test]
async fn test_create_message_returns_mandatory_attributes() {
    let server = MockTwilioServer::start().await.unwrap();
    server.stub_create_message().await;

    let (status, body) = TestClient::new(&server)
        .post(
            "/Messages.json",
            &[("From", "+15005550006"), ("To", "+15005550003"), ("Body", "Example")],
        )
        .await;

    assert_eq!(status, 201);
    assert_eq!(body["body"], "Example");
    assert_eq!(body["to"], "+15005550003");
    assert_eq!(body["from"], "+15005550006");
    assert_eq!(body["status"], "queued");
    assert_eq!(body["error_code"], Value::Null);
    assert_eq!(body["error_message"], Value::Null);
    assert!(is_sid(body["sid"].as_str().unwrap(), "SM"), "got {}", body["sid"]);
}

#[tokio::test]
async fn test_create_messages_are_stored_in_order() {
    let server = MockTwilioServer::start().await.unwrap();
    server.stub_create_message().await;
    let client = TestClient::new(&server);

    for body in ["first", "second"] {
        let (status, _) = client
            .post(
                "/Messages.json",
                &[("From", "+15005550006"), ("To", "+15005550003"), ("Body", body)],
            )
            .await;
        assert_eq!(status, 201);
    }

    let messages = server.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(server.message_count(), 2);
    assert_eq!(messages[0].body.as_deref(), Some("first"));
    assert_eq!(messages[1].body.as_deref(), Some("second"));
    for message in &messages {
        assert_eq!(message.from.as_deref(), Some("+15005550006"));
        assert_eq!(message.to.as_deref(), Some("+15005550003"));
        assert_eq!(message.status, MessageStatus::Queued);
        assert!(is_sid(message.sid.as_str(), "SM"));
    }
    assert_ne!(messages[0].sid, messages[1].sid);
}

#[tokio::test]
async fn test_create_message_decodes_form_values() {
    let server = MockTwilioServer::start().await.unwrap();
    server.stub_create_message().await;

    TestClient::new(&server)
        .post(
            "/Messages.json",
            &[("From", "+15005550006"), ("To", "+15005550003"), ("Body", "Hi & bye = 100%")],
        )
        .await;

    assert_eq!(server.messages()[0].body.as_deref(), Some("Hi & bye = 100%"));
}

#[tokio::test]
async fn test_create_message_requires_to() {
    let server = MockTwilioServer::start().await.unwrap();
    server.stub_create_message().await;

    let (status, body) = TestClient::new(&server)
        .post("/Messages.json", &[("From", "+15005550006"), ("Body", "Example")])
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], 21604);
    assert!(server.messages().is_empty());
}

#[tokio::test]
async fn test_create_message_with_expected_body() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_create_message_with(
            BodyParams::new()
                .with("from", "+15005550006")
                .with("to", "+15005550003")
                .with("body", "Example"),
        )
        .await;
    let client = TestClient::new(&server);

    let (status, _) = client
        .post(
            "/Messages.json",
            &[("From", "+15005550006"), ("To", "+15005550003"), ("Body", "Example")],
        )
        .await;
    assert_eq!(status, 201);
    assert!(server.verify().await.is_ok());

    let (status, body) = client
        .post(
            "/Messages.json",
            &[("From", "+15005550006"), ("To", "+15005550003"), ("Body", "Other")],
        )
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["code"], 20404);
    assert_eq!(server.message_count(), 1);
    assert!(matches!(server.verify().await, Err(Error::UnmatchedRequests(_))));
}

#[tokio::test]
async fn test_create_message_body_must_match_exactly() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_create_message_with(
            BodyParams::new()
                .with("from", "+15005550006")
                .with("to", "+15005550003"),
        )
        .await;

    let (status, _) = TestClient::new(&server)
        .post(
            "/Messages.json",
            &[("From", "+15005550006"), ("To", "+15005550003"), ("Body", "Extra")],
        )
        .await;

    assert_eq!(status, 404);
    assert_eq!(server.message_count(), 0);
    assert_eq!(server.unmatched_requests().await.len(), 1);
}

#[tokio::test]
async fn test_create_message_with_partial_body() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_create_message_with(BodyParams::new().with("to", "+15005550003").partial())
        .await;

    let (status, _) = TestClient::new(&server)
        .post(
            "/Messages.json",
            &[("From", "+15005550006"), ("To", "+15005550003"), ("Body", "Extra")],
        )
        .await;

    assert_eq!(status, 201);
    assert_eq!(server.message_count(), 1);
}

#[tokio::test]
async fn test_create_message_with_messaging_service() {
    let server = MockTwilioServer::start().await.unwrap();
    server.stub_create_message().await;
    let service_sid = "MG0123456789abcdef0123456789abcdef";

    let (status, body) = TestClient::new(&server)
        .post(
            "/Messages.json",
            &[("MessagingServiceSid", service_sid), ("To", "+15005550003")],
        )
        .await;

    assert_eq!(status, 201, "unexpected body: {body}");
    assert_eq!(body["messaging_service_sid"], service_sid);
    assert_eq!(body["from"], Value::Null);
    assert_eq!(body["status"], "queued");
    let messages = server.messages();
    assert_eq!(messages[0].messaging_service_sid.as_deref(), Some(service_sid));
    assert_eq!(messages[0].from, None);
}

#[tokio::test]
async fn test_create_message_requires_sender() {
    let server = MockTwilioServer::start().await.unwrap();
    server.stub_create_message().await;

    let (status, body) = TestClient::new(&server)
        .post("/Messages.json", &[("To", "+15005550003"), ("Body", "Example")])
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], 21603);
    assert!(server.messages().is_empty());
}

#[tokio::test]
async fn test_create_message_with_media_urls() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_create_message_with(
            BodyParams::new()
                .with("from", "+15005550006")
                .with("to", "+15005550003")
                .with("media_url", "https://example.com/a.png")
                .with("media_url", "https://example.com/b.png"),
        )
        .await;

    let (status, _) = TestClient::new(&server)
        .post(
            "/Messages.json",
            &[
                ("From", "+15005550006"),
                ("To", "+15005550003"),
                ("MediaUrl", "https://example.com/a.png"),
                ("MediaUrl", "https://example.com/b.png"),
            ],
        )
        .await;

    assert_eq!(status, 201);
    let requests = server.received_requests().await;
    assert_eq!(
        requests[0].form.get_all("MediaUrl"),
        vec!["https://example.com/a.png", "https://example.com/b.png"]
    );
}

#[tokio::test]
async fn test_fetch_message_returns_given_attributes() {
    let server = MockTwilioServer::start().await.unwrap();
    let sid = "SM0123456789abcdef0123456789abcdef";
    server
        .fetch_message(
            sid,
            MessageAttributes::new()
                .with_status(MessageStatus::Failed)
                .with_error_code(30004)
                .with_error_message("Message blocked"),
        )
        .await
        .unwrap();

    let (status, body) = TestClient::new(&server)
        .get(&format!("/Messages/{sid}.json"))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["sid"], sid);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["error_code"], 30004);
    assert_eq!(body["error_message"], "Message blocked");
    assert_eq!(body["from"], Value::Null);
    assert_eq!(body["to"], Value::Null);
}

#[tokio::test]
async fn test_fetch_message_status_progression() {
    let server = MockTwilioServer::start().await.unwrap();
    let client = TestClient::new(&server);
    let sid = server.number_generator().message_sid();
    let path = format!("/Messages/{sid}.json");

    server
        .fetch_message(
            sid.as_str(),
            MessageAttributes::new().with_status(MessageStatus::Queued),
        )
        .await
        .unwrap();
    let (_, body) = client.get(&path).await;
    assert_eq!(body["status"], "queued");

    server
        .fetch_message(
            sid.as_str(),
            MessageAttributes::new()
                .with_status(MessageStatus::Delivered)
                .with_body("Example"),
        )
        .await
        .unwrap();
    let (_, body) = client.get(&path).await;
    assert_eq!(body["status"], "delivered");
    assert_eq!(body["body"], "Example");
}

#[tokio::test]
async fn test_fetch_message_unknown_sid_is_unmatched() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .fetch_message(
            "SM0123456789abcdef0123456789abcdef",
            MessageAttributes::new().with_status(MessageStatus::Sent),
        )
        .await
        .unwrap();

    let (status, _) = TestClient::new(&server)
        .get("/Messages/SMffffffffffffffffffffffffffffffff.json")
        .await;

    assert_eq!(status, 404);
    assert_eq!(server.unmatched_requests().await.len(), 1);
}

#[tokio::test]
async fn test_fetch_message_rejects_bad_arrangement() {
    let server = MockTwilioServer::start().await.unwrap();

    let result = server
        .fetch_message(
            "SM0123456789abcdef0123456789abcdef",
            MessageAttributes::new().with_error_code(30004),
        )
        .await;
    assert!(matches!(
        result,
        Err(Error::MissingAttribute { field: "status", .. })
    ));

    let result = server
        .fetch_message(
            "SM-not-a-sid",
            MessageAttributes::new().with_status(MessageStatus::Sent),
        )
        .await;
    assert!(matches!(result, Err(Error::InvalidSid(_))));

    assert_eq!(server.stub_count().await, 0);
}

// =============================================================================
// Phone numbers
// =============================================================================

#[tokio::test]
async fn test_buy_number() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_buy_number_with(
            BodyParams::new()
                .with("phone_number", "+15005550006")
                .with("sms_url", "test.host/callback")
                .with("sms_method", "POST"),
        )
        .await;

    let (status, body) = TestClient::new(&server)
        .post(
            "/IncomingPhoneNumbers.json",
            &[
                ("PhoneNumber", "+15005550006"),
                ("SmsUrl", "test.host/callback"),
                ("SmsMethod", "POST"),
            ],
        )
        .await;

    assert_eq!(status, 201);
    assert_eq!(body["sid"], server.credentials().account_sid.as_str());
    assert_eq!(body["phone_number"], "+15005550006");
}

#[tokio::test]
async fn test_buy_number_by_area_code() {
    let server = MockTwilioServer::start().await.unwrap();
    server.stub_buy_number().await;

    let (status, body) = TestClient::new(&server)
        .post("/IncomingPhoneNumbers.json", &[("AreaCode", "212")])
        .await;

    assert_eq!(status, 201);
    assert!(body["phone_number"].as_str().unwrap().starts_with("+1212555"));

    let (status, body) = TestClient::new(&server)
        .post("/IncomingPhoneNumbers.json", &[("AreaCode", "21")])
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], 20001);
}

#[tokio::test]
async fn test_buy_number_requires_number() {
    let server = MockTwilioServer::start().await.unwrap();
    server.stub_buy_number().await;

    let (status, body) = TestClient::new(&server)
        .post("/IncomingPhoneNumbers.json", &[("SmsUrl", "test.host/callback")])
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], 21421);
}

#[tokio::test]
async fn test_incoming_number_list() {
    let server = MockTwilioServer::start().await.unwrap();
    let generator = server.number_generator();
    let first = generator.generate(None, None).unwrap();
    let second = generator.generate(None, None).unwrap();

    server
        .set_incoming_number_list([first.clone(), second.clone()])
        .await;

    let (status, body) = TestClient::new(&server)
        .get("/IncomingPhoneNumbers.json")
        .await;

    assert_eq!(status, 200);
    let numbers = body["incoming_phone_numbers"].as_array().unwrap();
    assert_eq!(numbers.len(), 2);
    assert_eq!(numbers[0]["phone_number"], first.as_str());
    assert_eq!(numbers[1]["phone_number"], second.as_str());
    assert!(is_sid(numbers[0]["sid"].as_str().unwrap(), "PN"));
    assert_eq!(body["next_page_uri"], Value::Null);
    assert_eq!(server.incoming_numbers().len(), 2);
}

#[tokio::test]
async fn test_incoming_number_list_is_replaced() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .set_incoming_number_list(["+15005550001", "+15005550002"])
        .await;
    server.set_incoming_number_list(["+15005550009"]).await;

    let (_, body) = TestClient::new(&server)
        .get("/IncomingPhoneNumbers.json")
        .await;

    let numbers = body["incoming_phone_numbers"].as_array().unwrap();
    assert_eq!(numbers.len(), 1);
    assert_eq!(numbers[0]["phone_number"], "+15005550009");
}

#[tokio::test]
async fn test_fetch_number_returns_given_attributes() {
    let server = MockTwilioServer::start().await.unwrap();
    let sid = "PN0123456789abcdef0123456789abcdef";
    server
        .fetch_number(sid, NumberAttributes::new().with_phone_number("+15005550006"))
        .await
        .unwrap();

    let (status, body) = TestClient::new(&server)
        .get(&format!("/IncomingPhoneNumbers/{sid}.json"))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["sid"], sid);
    assert_eq!(body["phone_number"], "+15005550006");
}

#[tokio::test]
async fn test_fetch_number_requires_phone_number() {
    let server = MockTwilioServer::start().await.unwrap();

    let result = server
        .fetch_number("PN0123456789abcdef0123456789abcdef", NumberAttributes::new())
        .await;

    assert!(matches!(
        result,
        Err(Error::MissingAttribute {
            field: "phone_number",
            ..
        })
    ));
}

// =============================================================================
// Matching
// =============================================================================

#[tokio::test]
async fn test_wrong_credentials_are_unmatched() {
    let server = MockTwilioServer::start().await.unwrap();
    server.stub_create_message().await;
    let intruder = TestClient::with_credentials(
        &server,
        Credentials::new(server.credentials().account_sid.clone(), "wrong-token"),
    );

    let (status, _) = intruder
        .post("/Messages.json", &[("From", "+15005550006"), ("To", "+15005550003")])
        .await;

    assert_eq!(status, 404);
    assert!(server.messages().is_empty());
    let err = server.verify().await.unwrap_err();
    assert!(err.to_string().contains("POST"));
}

#[tokio::test]
async fn test_other_account_is_unmatched() {
    let server = MockTwilioServer::start().await.unwrap();
    server.stub_create_message().await;
    let other = TestClient::with_credentials(
        &server,
        Credentials::new("ACffffffffffffffffffffffffffffffff", "test-auth-token"),
    );

    let (status, _) = other
        .post("/Messages.json", &[("From", "+15005550006"), ("To", "+15005550003")])
        .await;

    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_missing_auth_is_unmatched() {
    let server = MockTwilioServer::start().await.unwrap();
    server
        .stub_available_numbers(AvailableNumbers::new())
        .await
        .unwrap();

    let response = reqwest::Client::new()
        .get(format!("{}{}", server.api_base_url(), LOCAL_US))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_required_header() {
    let server = MockTwilioServer::builder()
        .require_header("Accept", "application/json")
        .start()
        .await
        .unwrap();
    server
        .stub_available_numbers(AvailableNumbers::new())
        .await
        .unwrap();
    let credentials = server.credentials();
    let url = format!("{}{}", server.api_base_url(), LOCAL_US);
    let client = reqwest::Client::new();

    let without = client
        .get(&url)
        .basic_auth(&credentials.account_sid, Some(&credentials.auth_token))
        .send()
        .await
        .unwrap();
    assert_eq!(without.status().as_u16(), 404);

    let with = client
        .get(&url)
        .basic_auth(&credentials.account_sid, Some(&credentials.auth_token))
        .header("Accept", "application/json")
        .send()
        .await
        .unwrap();
    assert_eq!(with.status().as_u16(), 200);
}

#[tokio::test]
async fn test_custom_credentials() {
    let credentials = Credentials::new("ACaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "secret");
    let server = MockTwilioServer::builder()
        .credentials(credentials.clone())
        .start()
        .await
        .unwrap();
    server.stub_create_message().await;

    assert!(server.api_base_url().ends_with("/Accounts/ACaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
    let (status, _) = TestClient::with_credentials(&server, credentials)
        .post("/Messages.json", &[("From", "+15005550006"), ("To", "+15005550003")])
        .await;
    assert_eq!(status, 201);
}

#[tokio::test]
async fn test_unstubbed_endpoint_is_unmatched() {
    let server = MockTwilioServer::start().await.unwrap();

    let (status, body) = TestClient::new(&server).get("/Calls.json").await;

    assert_eq!(status, 404);
    assert_eq!(body["code"], 20404);
    let unmatched = server.unmatched_requests().await;
    assert_eq!(unmatched.len(), 1);
    assert!(unmatched[0].endpoint.is_none());
}

// =============================================================================
// Journal and reset
// =============================================================================

#[tokio::test]
async fn test_received_requests() {
    let server = MockTwilioServer::start().await.unwrap();
    server.stub_create_message().await;

    assert!(server.received_requests().await.is_empty());

    TestClient::new(&server)
        .post(
            "/Messages.json",
            &[("From", "+15005550006"), ("To", "+15005550003"), ("Body", "Example")],
        )
        .await;

    let requests = server.received_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert!(requests[0].path.ends_with("/Messages.json"));
    assert_eq!(requests[0].form.get("Body"), Some("Example"));
    assert!(requests[0].matched);

    server.clear_received_requests().await;
    assert!(server.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_reset() {
    let server = MockTwilioServer::start().await.unwrap();
    let client = TestClient::new(&server);
    server.stub_create_message().await;
    server.set_incoming_number_list(["+15005550006"]).await;
    client
        .post("/Messages.json", &[("From", "+15005550006"), ("To", "+15005550003")])
        .await;
    assert_eq!(server.message_count(), 1);

    server.reset().await;

    assert_eq!(server.message_count(), 0);
    assert!(server.incoming_numbers().is_empty());
    assert!(server.received_requests().await.is_empty());
    assert_eq!(server.stub_count().await, 0);

    let (status, _) = client
        .post("/Messages.json", &[("From", "+15005550006"), ("To", "+15005550003")])
        .await;
    assert_eq!(status, 404);
}
