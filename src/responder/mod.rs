//! Response generation for simulated endpoints.

mod builder;
mod templates;

pub use builder::*;
pub use templates::*;

use crate::account::SimulatedAccount;
use crate::matcher::ApiRequest;
use crate::resource::{Message, MessageStatus, Sid};
use crate::Error;
use serde::Serialize;

/// A JSON response with its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseBody {
    pub status: u16,
    pub json: String,
}

impl ResponseBody {
    pub fn json(status: u16, value: &impl Serialize) -> Self {
        match serde_json::to_string(value) {
            Ok(json) => ResponseBody { status, json },
            Err(e) => {
                tracing::warn!("Failed to serialize response: {}", e);
                Self::error(500, codes::INTERNAL, e.to_string())
            }
        }
    }

    pub fn error(status: u16, code: u32, message: impl Into<String>) -> Self {
        let body = ErrorResource::new(status, code, message);
        // ErrorResource only holds strings and integers.
        let json = serde_json::to_string(&body).unwrap_or_default();
        ResponseBody { status, json }
    }
}

/// Produces the response of one endpoint from the account state at
/// request time.
#[derive(Debug, Clone)]
pub enum Producer {
    AvailableNumbers {
        empty_list: bool,
        country: String,
        area_code: Option<String>,
    },
    CreateMessage,
    BuyNumber,
    IncomingNumbers,
    FetchMessage {
        sid: Sid,
    },
    FetchNumber {
        sid: Sid,
    },
}

impl Producer {
    pub(crate) fn respond(
        &self,
        request: &ApiRequest,
        account: &SimulatedAccount,
    ) -> ResponseBody {
        let account_sid = account.credentials.account_sid.as_str();
        match self {
            Producer::AvailableNumbers {
                empty_list,
                country,
                area_code,
            } => {
                if *empty_list {
                    return ResponseBody::json(200, &AvailableNumberList::new(std::iter::empty()));
                }
                let area_code = area_code
                    .as_deref()
                    .or_else(|| request.query.get("AreaCode").map(String::as_str));
                match account.generator.generate(Some(country.as_str()), area_code) {
                    Ok(number) => {
                        ResponseBody::json(200, &AvailableNumberList::new([number.as_str()]))
                    }
                    Err(e @ Error::InvalidAreaCode(_)) => {
                        ResponseBody::error(400, codes::INVALID_PARAMETER, e.to_string())
                    }
                    Err(e) => ResponseBody::error(500, codes::INTERNAL, e.to_string()),
                }
            }

            Producer::CreateMessage => {
                let form = &request.form;
                let Some(to) = form.get("To") else {
                    return ResponseBody::error(
                        400,
                        codes::TO_REQUIRED,
                        "A 'To' phone number is required.",
                    );
                };
                let from = form.get("From");
                let messaging_service_sid = form.get("MessagingServiceSid");
                if from.is_none() && messaging_service_sid.is_none() {
                    return ResponseBody::error(
                        400,
                        codes::FROM_REQUIRED,
                        "A 'From' phone number or 'MessagingServiceSid' is required.",
                    );
                }
                let message = Message {
                    sid: account.generator.message_sid(),
                    from: from.map(str::to_string),
                    messaging_service_sid: messaging_service_sid.map(str::to_string),
                    to: Some(to.to_string()),
                    body: form.get("Body").map(str::to_string),
                    status: MessageStatus::Queued,
                    error_code: None,
                    error_message: None,
                };
                let response =
                    ResponseBody::json(201, &MessageResource::new(&message, account_sid));
                account.store.write().append_message(message);
                response
            }

            Producer::BuyNumber => {
                let form = &request.form;
                let phone_number = match (form.get("PhoneNumber"), form.get("AreaCode")) {
                    (Some(number), _) => number.to_string(),
                    (None, Some(area_code)) => {
                        match account.generator.generate(None, Some(area_code)) {
                            Ok(number) => number,
                            Err(e) => {
                                return ResponseBody::error(
                                    400,
                                    codes::INVALID_PARAMETER,
                                    e.to_string(),
                                )
                            }
                        }
                    }
                    (None, None) => {
                        return ResponseBody::error(
                            400,
                            codes::PHONE_NUMBER_REQUIRED,
                            "A 'PhoneNumber' or 'AreaCode' is required.",
                        )
                    }
                };
                // Purchases report the account SID as the resource SID.
                let resource = IncomingNumberResource {
                    sid: account_sid,
                    account_sid,
                    phone_number: &phone_number,
                };
                ResponseBody::json(201, &resource)
            }

            Producer::IncomingNumbers => {
                let store = account.store.read();
                let list = IncomingNumberList::single_page(
                    store.incoming_numbers(),
                    account_sid,
                    &request.path,
                );
                ResponseBody::json(200, &list)
            }

            Producer::FetchMessage { sid } => match account.store.read().fetchable_message(sid) {
                Some(message) => {
                    ResponseBody::json(200, &MessageResource::new(message, account_sid))
                }
                None => not_found(request),
            },

            Producer::FetchNumber { sid } => match account.store.read().fetchable_number(sid) {
                Some(number) => {
                    ResponseBody::json(200, &IncomingNumberResource::new(number, account_sid))
                }
                None => not_found(request),
            },
        }
    }
}

/// The 404 returned when no stub (or no stored resource) answers a request.
pub fn not_found(request: &ApiRequest) -> ResponseBody {
    ResponseBody::error(
        404,
        codes::NOT_FOUND,
        format!("No stub matches {}", request.describe()),
    )
}
