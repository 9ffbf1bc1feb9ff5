//! Resource identifiers.

use crate::{Error, Result};

/// Prefix of message SIDs.
pub const MESSAGE_PREFIX: &str = "SM";

/// Prefix of incoming phone number SIDs.
pub const INCOMING_NUMBER_PREFIX: &str = "PN";

/// Number of characters following the two-letter prefix.
pub const SID_BODY_LEN: usize = 32;

/// A resource identifier: two uppercase letters followed by 32 lowercase
/// alphanumeric characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Sid(String);

impl Sid {
    /// Validate and wrap an identifier.
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if is_valid(&value) {
            Ok(Sid(value))
        } else {
            Err(Error::InvalidSid(value))
        }
    }

    /// Build from a prefix and an already lower-case alphanumeric body.
    pub(crate) fn from_parts(prefix: &str, body: &str) -> Self {
        Sid(format!("{prefix}{body}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two-letter resource prefix, e.g. `SM`.
    pub fn prefix(&self) -> &str {
        &self.0[..2]
    }
}

impl std::fmt::Display for Sid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Sid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Sid::parse(s)
    }
}

fn is_valid(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 2 + SID_BODY_LEN
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..]
            .iter()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}
