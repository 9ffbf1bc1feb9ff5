//! Basic example demonstrating twilio-mock usage.
//!
//! Run with: cargo run --example basic

use twilio_mock::{AvailableNumbers, BodyParams, MessageAttributes, MessageStatus, MockTwilioServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Start the mock Twilio server
    let server = MockTwilioServer::start().await?;
    let credentials = server.credentials().clone();
    let base_url = server.api_base_url();

    println!("Mock Twilio server started!");
    println!("  URL: {}", server.url());
    println!("  Account: {}", credentials.account_sid);
    println!();

    // Register stubs
    server
        .stub_available_numbers(AvailableNumbers::new().area_code("212"))
        .await?;
    server
        .stub_create_message_with(
            BodyParams::new()
                .with("from", "+15005550006")
                .with("to", "+15005550003")
                .with("body", "Hello from the mock"),
        )
        .await;
    let sid = server.number_generator().message_sid();
    server
        .fetch_message(
            sid.as_str(),
            MessageAttributes::new()
                .with_status(MessageStatus::Delivered)
                .with_body("Hello from the mock"),
        )
        .await?;

    println!("Registered stubs:");
    println!("  - AvailablePhoneNumbers/US/Local -> one +1212555xxxx number");
    println!("  - Messages (exact body) -> queued message");
    println!("  - Messages/{} -> delivered", sid);
    println!();

    let client = reqwest::Client::new();

    println!("=== Test: list available numbers ===");
    let response = client
        .get(format!("{base_url}/AvailablePhoneNumbers/US/Local.json"))
        .basic_auth(&credentials.account_sid, Some(&credentials.auth_token))
        .send()
        .await?;
    println!("[Status: {}]\n{}\n", response.status(), response.text().await?);

    println!("=== Test: send a message ===");
    let response = client
        .post(format!("{base_url}/Messages.json"))
        .basic_auth(&credentials.account_sid, Some(&credentials.auth_token))
        .form(&[
            ("From", "+15005550006"),
            ("To", "+15005550003"),
            ("Body", "Hello from the mock"),
        ])
        .send()
        .await?;
    println!("[Status: {}]\n{}\n", response.status(), response.text().await?);

    println!("=== Test: fetch a message ===");
    let response = client
        .get(format!("{base_url}/Messages/{sid}.json"))
        .basic_auth(&credentials.account_sid, Some(&credentials.auth_token))
        .send()
        .await?;
    println!("[Status: {}]\n{}\n", response.status(), response.text().await?);

    println!("Messages recorded: {}", server.message_count());
    server.verify().await?;

    Ok(())
}
