//! JSON wire shapes of Twilio responses.

use crate::account::API_VERSION;
use crate::resource::{IncomingPhoneNumber, Message, MessageStatus};
use serde::Serialize;

/// Page size reported by list responses.
pub const PAGE_SIZE: u32 = 50;

/// Twilio error codes used by the simulated endpoints.
pub mod codes {
    pub const INVALID_PARAMETER: u32 = 20001;
    pub const NOT_FOUND: u32 = 20404;
    pub const INTERNAL: u32 = 20500;
    pub const PHONE_NUMBER_REQUIRED: u32 = 21421;
    pub const FROM_REQUIRED: u32 = 21603;
    pub const TO_REQUIRED: u32 = 21604;
}

#[derive(Debug, Serialize)]
pub struct AvailableNumberList<'a> {
    pub available_phone_numbers: Vec<AvailableNumber<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AvailableNumber<'a> {
    #[serde(rename = "PhoneNumber")]
    pub phone_number: &'a str,
}

impl<'a> AvailableNumberList<'a> {
    pub fn new(numbers: impl IntoIterator<Item = &'a str>) -> Self {
        AvailableNumberList {
            available_phone_numbers: numbers
                .into_iter()
                .map(|phone_number| AvailableNumber { phone_number })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResource<'a> {
    pub sid: &'a str,
    pub account_sid: &'a str,
    pub api_version: &'static str,
    pub from: Option<&'a str>,
    pub messaging_service_sid: Option<&'a str>,
    pub to: Option<&'a str>,
    pub body: Option<&'a str>,
    pub status: MessageStatus,
    pub error_code: Option<u32>,
    pub error_message: Option<&'a str>,
}

impl<'a> MessageResource<'a> {
    pub fn new(message: &'a Message, account_sid: &'a str) -> Self {
        MessageResource {
            sid: message.sid.as_str(),
            account_sid,
            api_version: API_VERSION,
            from: message.from.as_deref(),
            messaging_service_sid: message.messaging_service_sid.as_deref(),
            to: message.to.as_deref(),
            body: message.body.as_deref(),
            status: message.status,
            error_code: message.error_code,
            error_message: message.error_message.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IncomingNumberResource<'a> {
    pub sid: &'a str,
    pub account_sid: &'a str,
    pub phone_number: &'a str,
}

impl<'a> IncomingNumberResource<'a> {
    pub fn new(number: &'a IncomingPhoneNumber, account_sid: &'a str) -> Self {
        IncomingNumberResource {
            sid: number.sid.as_str(),
            account_sid,
            phone_number: &number.phone_number,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IncomingNumberList<'a> {
    pub incoming_phone_numbers: Vec<IncomingNumberResource<'a>>,
    pub page: u32,
    pub page_size: u32,
    pub uri: &'a str,
    pub next_page_uri: Option<&'a str>,
}

impl<'a> IncomingNumberList<'a> {
    /// A single, final page holding every number.
    pub fn single_page(
        numbers: &'a [IncomingPhoneNumber],
        account_sid: &'a str,
        uri: &'a str,
    ) -> Self {
        IncomingNumberList {
            incoming_phone_numbers: numbers
                .iter()
                .map(|number| IncomingNumberResource::new(number, account_sid))
                .collect(),
            page: 0,
            page_size: PAGE_SIZE,
            uri,
            next_page_uri: None,
        }
    }
}

/// Twilio's error body.
#[derive(Debug, Serialize)]
pub struct ErrorResource {
    pub code: u32,
    pub message: String,
    pub more_info: String,
    pub status: u16,
}

impl ErrorResource {
    pub fn new(status: u16, code: u32, message: impl Into<String>) -> Self {
        ErrorResource {
            code,
            message: message.into(),
            more_info: format!("https://www.twilio.com/docs/errors/{code}"),
            status,
        }
    }
}
