//! Builders for stub arrangements.

use crate::number::{validate_area_code, DEFAULT_COUNTRY};
use crate::resource::{IncomingPhoneNumber, Message, MessageStatus, Sid};
use crate::{Error, Result};

/// Options for the available-numbers stub.
#[derive(Debug, Clone, Default)]
pub struct AvailableNumbers {
    pub(crate) empty_list: bool,
    pub(crate) country: Option<String>,
    pub(crate) area_code: Option<String>,
}

impl AvailableNumbers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer with an empty list.
    pub fn empty_list(mut self) -> Self {
        self.empty_list = true;
        self
    }

    /// Serve the list for this ISO country code (default `US`). Any code is
    /// accepted; numbers keep the `+1` test shape.
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Embed this area code in every generated number. Without it, the
    /// request's `AreaCode` query parameter is used when present.
    pub fn area_code(mut self, area_code: impl Into<String>) -> Self {
        self.area_code = Some(area_code.into());
        self
    }

    /// Validate the area code; returns the upper-cased country.
    pub(crate) fn validated_country(&self) -> Result<String> {
        let country = self
            .country
            .as_deref()
            .unwrap_or(DEFAULT_COUNTRY)
            .to_ascii_uppercase();
        if let Some(area_code) = &self.area_code {
            validate_area_code(area_code)?;
        }
        Ok(country)
    }
}

/// Attributes returned when a message is fetched by SID.
///
/// Nothing is derived: fields left unset are returned as `null`.
#[derive(Debug, Clone, Default)]
pub struct MessageAttributes {
    from: Option<String>,
    messaging_service_sid: Option<String>,
    to: Option<String>,
    body: Option<String>,
    status: Option<MessageStatus>,
    error_code: Option<u32>,
    error_message: Option<String>,
}

impl MessageAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_messaging_service_sid(mut self, sid: impl Into<String>) -> Self {
        self.messaging_service_sid = Some(sid.into());
        self
    }

    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_status(mut self, status: MessageStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_error_code(mut self, code: u32) -> Self {
        self.error_code = Some(code);
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Build the message; `status` is required.
    pub(crate) fn into_message(self, sid: Sid) -> Result<Message> {
        let status = self.status.ok_or(Error::MissingAttribute {
            resource: "message",
            field: "status",
        })?;
        Ok(Message {
            sid,
            from: self.from,
            messaging_service_sid: self.messaging_service_sid,
            to: self.to,
            body: self.body,
            status,
            error_code: self.error_code,
            error_message: self.error_message,
        })
    }
}

/// Attributes returned when an incoming number is fetched by SID.
#[derive(Debug, Clone, Default)]
pub struct NumberAttributes {
    phone_number: Option<String>,
}

impl NumberAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub(crate) fn into_number(self, sid: Sid) -> Result<IncomingPhoneNumber> {
        let phone_number = self.phone_number.ok_or(Error::MissingAttribute {
            resource: "incoming phone number",
            field: "phone_number",
        })?;
        Ok(IncomingPhoneNumber { sid, phone_number })
    }
}
