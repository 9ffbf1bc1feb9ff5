//! Simulated Twilio resources.

mod sid;

pub use sid::*;

/// Delivery status of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Accepted,
    Scheduled,
    Queued,
    Sending,
    Sent,
    Failed,
    Delivered,
    Undelivered,
    Receiving,
    Received,
    Read,
    Canceled,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Accepted => "accepted",
            MessageStatus::Scheduled => "scheduled",
            MessageStatus::Queued => "queued",
            MessageStatus::Sending => "sending",
            MessageStatus::Sent => "sent",
            MessageStatus::Failed => "failed",
            MessageStatus::Delivered => "delivered",
            MessageStatus::Undelivered => "undelivered",
            MessageStatus::Receiving => "receiving",
            MessageStatus::Received => "received",
            MessageStatus::Read => "read",
            MessageStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message resource.
///
/// Messages created through the create endpoint always carry `to`, `status`
/// and a sender (`from` or `messaging_service_sid`); messages arranged for
/// fetching carry exactly the attributes the test supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sid: Sid,
    pub from: Option<String>,
    pub messaging_service_sid: Option<String>,
    pub to: Option<String>,
    pub body: Option<String>,
    pub status: MessageStatus,
    pub error_code: Option<u32>,
    pub error_message: Option<String>,
}

/// A phone number owned by the simulated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingPhoneNumber {
    pub sid: Sid,
    pub phone_number: String,
}
