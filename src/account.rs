//! The simulated account: credentials plus the state every stub reads from.

use crate::number::NumberGenerator;
use crate::store::ResourceStore;
use base64::Engine;
use parking_lot::RwLock;

/// API version segment used in every account-scoped path.
pub const API_VERSION: &str = "2010-04-01";

/// Account SID used when no credentials are configured.
pub const DEFAULT_ACCOUNT_SID: &str = "AC0123456789abcdef0123456789abcdef";

/// Auth token used when no credentials are configured.
pub const DEFAULT_AUTH_TOKEN: &str = "test-auth-token";

/// Basic-auth credentials of the simulated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account_sid: String,
    pub auth_token: String,
}

impl Credentials {
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Credentials {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Read `TWILIO_ACCOUNT_SID` and `TWILIO_AUTH_TOKEN`, falling back to the defaults.
    pub fn from_env() -> Self {
        let default = Credentials::default();
        Credentials {
            account_sid: std::env::var("TWILIO_ACCOUNT_SID").unwrap_or(default.account_sid),
            auth_token: std::env::var("TWILIO_AUTH_TOKEN").unwrap_or(default.auth_token),
        }
    }

    /// Decode an `Authorization: Basic ...` header value.
    pub fn from_basic_auth(header: &str) -> Option<Self> {
        let (scheme, encoded) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (user, password) = decoded.split_once(':')?;
        Some(Credentials::new(user, password))
    }

    /// Encode as an `Authorization` header value.
    pub fn to_basic_auth(&self) -> String {
        let raw = format!("{}:{}", self.account_sid, self.auth_token);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }

    /// Path prefix all simulated endpoints are nested under.
    pub fn base_path(&self) -> String {
        format!("/{}/Accounts/{}", API_VERSION, self.account_sid)
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials::new(DEFAULT_ACCOUNT_SID, DEFAULT_AUTH_TOKEN)
    }
}

/// Everything a response producer may read or mutate at request time.
pub(crate) struct SimulatedAccount {
    pub credentials: Credentials,
    pub store: RwLock<ResourceStore>,
    pub generator: NumberGenerator,
}

impl SimulatedAccount {
    pub fn new(credentials: Credentials, generator: NumberGenerator) -> Self {
        SimulatedAccount {
            credentials,
            store: RwLock::new(ResourceStore::default()),
            generator,
        }
    }
}
