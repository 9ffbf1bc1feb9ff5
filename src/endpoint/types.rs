//! Endpoint keys and request parameter types.

use crate::resource::Sid;
use axum::http::Method;

/// A simulated endpoint. Each key holds at most one stub at a time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endpoint {
    /// `GET /AvailablePhoneNumbers/{country}/Local.json`
    ListAvailableNumbers { country: String },

    /// `POST /Messages.json`
    CreateMessage,

    /// `POST /IncomingPhoneNumbers.json`
    BuyNumber,

    /// `GET /IncomingPhoneNumbers.json`
    ListIncomingNumbers,

    /// `GET /Messages/{sid}.json`
    FetchMessage { sid: Sid },

    /// `GET /IncomingPhoneNumbers/{sid}.json`
    FetchNumber { sid: Sid },
}

impl Endpoint {
    /// Available local numbers for a country; the code is upper-cased.
    pub fn available_numbers(country: &str) -> Self {
        Endpoint::ListAvailableNumbers {
            country: country.to_ascii_uppercase(),
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::CreateMessage | Endpoint::BuyNumber => Method::POST,
            Endpoint::ListAvailableNumbers { .. }
            | Endpoint::ListIncomingNumbers
            | Endpoint::FetchMessage { .. }
            | Endpoint::FetchNumber { .. } => Method::GET,
        }
    }

    /// Path relative to the account base path.
    pub fn path(&self) -> String {
        match self {
            Endpoint::ListAvailableNumbers { country } => {
                format!("/AvailablePhoneNumbers/{country}/Local.json")
            }
            Endpoint::CreateMessage => "/Messages.json".to_string(),
            Endpoint::BuyNumber | Endpoint::ListIncomingNumbers => {
                "/IncomingPhoneNumbers.json".to_string()
            }
            Endpoint::FetchMessage { sid } => format!("/Messages/{sid}.json"),
            Endpoint::FetchNumber { sid } => format!("/IncomingPhoneNumbers/{sid}.json"),
        }
    }

    /// Resolve a request to an endpoint key.
    ///
    /// `path` is the full request path; it must start with `base_path`
    /// (the account-scoped prefix) and end in `.json`.
    pub fn resolve(method: &Method, path: &str, base_path: &str) -> Option<Self> {
        let resource = path.strip_prefix(base_path)?.strip_prefix('/')?;
        let resource = resource.strip_suffix(".json")?;
        let segments: Vec<&str> = resource.split('/').collect();

        let endpoint = match (method.as_str(), segments.as_slice()) {
            ("GET", ["AvailablePhoneNumbers", country, "Local"]) => {
                Endpoint::available_numbers(country)
            }
            ("POST", ["Messages"]) => Endpoint::CreateMessage,
            ("GET", ["Messages", sid]) => Endpoint::FetchMessage {
                sid: Sid::parse(*sid).ok()?,
            },
            ("POST", ["IncomingPhoneNumbers"]) => Endpoint::BuyNumber,
            ("GET", ["IncomingPhoneNumbers"]) => Endpoint::ListIncomingNumbers,
            ("GET", ["IncomingPhoneNumbers", sid]) => Endpoint::FetchNumber {
                sid: Sid::parse(*sid).ok()?,
            },
            _ => return None,
        };
        Some(endpoint)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

// =============================================================================
// Form bodies
// =============================================================================

/// Decoded `application/x-www-form-urlencoded` fields in request order.
///
/// Keys may repeat, as with Twilio's multi-valued `MediaUrl`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams {
    pairs: Vec<(String, String)>,
}

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value sent for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value sent for `key`, in request order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for FormParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        FormParams {
            pairs: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Request body expectations
// =============================================================================

/// Form fields a create or purchase request must carry.
///
/// Keys are given in snake_case and converted to the wire casing
/// (`sms_url` becomes `SmsUrl`). Values are compared as strings, since the
/// wire format sends every parameter as a string.
///
/// By default the request body must hold exactly these fields, no more and
/// no fewer. [`BodyParams::partial`] lets extra fields through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyParams {
    fields: Vec<(String, String)>,
    partial: bool,
}

impl BodyParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `key` to be sent with the string form of `value`.
    ///
    /// Calling this twice with the same key expects the key twice.
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.fields.push((wire_key(key), value.to_string()));
        self
    }

    /// Accept requests that send fields beyond the expected ones.
    pub fn partial(mut self) -> Self {
        self.partial = true;
        self
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check the expected fields against a request body.
    pub fn matches(&self, form: &FormParams) -> bool {
        let mut remaining: Vec<(&str, &str)> = form.iter().collect();
        for (key, value) in self.iter() {
            match remaining.iter().position(|pair| *pair == (key, value)) {
                Some(index) => {
                    remaining.swap_remove(index);
                }
                None => return false,
            }
        }
        self.partial || remaining.is_empty()
    }
}

/// Convert a snake_case parameter name to the provider's wire casing.
///
/// Names that already contain an uppercase letter are kept as they are.
pub fn wire_key(key: &str) -> String {
    if key.chars().any(|c| c.is_ascii_uppercase()) {
        return key.to_string();
    }
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
