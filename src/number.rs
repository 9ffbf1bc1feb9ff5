//! Test phone number and SID synthesis.
//!
//! Numbers follow Twilio's magic test-number convention:
//! `+1<area code>555<suffix>`. Without an area code the generator uses
//! `500`, so numbers look like `+1500555dddd`. Magic numbers only exist
//! in the North American plan, so every country gets the `+1` prefix.

use crate::resource::{Sid, INCOMING_NUMBER_PREFIX, MESSAGE_PREFIX, SID_BODY_LEN};
use crate::{Error, Result};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

/// Country used when none is given.
pub const DEFAULT_COUNTRY: &str = "US";

/// Area code used when none is given.
pub const DEFAULT_AREA_CODE: &str = "500";

/// Exchange reserved for test numbers.
pub const RESERVED_EXCHANGE: &str = "555";

/// Prefix of every generated number, whatever the country.
pub const TEST_NUMBER_PREFIX: &str = "+1";

/// Byte offset of the reserved exchange in a generated number.
pub const RESERVED_EXCHANGE_OFFSET: usize = TEST_NUMBER_PREFIX.len() + AREA_CODE_LEN;

const AREA_CODE_LEN: usize = 3;
const SUFFIX_SPACE: u16 = 10_000;

/// Check that an area code is exactly three ASCII digits.
///
/// Malformed area codes are rejected, never truncated or padded.
pub fn validate_area_code(area_code: &str) -> Result<&str> {
    if area_code.len() == AREA_CODE_LEN && area_code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(area_code)
    } else {
        Err(Error::InvalidAreaCode(area_code.to_string()))
    }
}

/// Generates test phone numbers and resource SIDs from one random source.
///
/// Numbers handed out by a generator are never handed out again until
/// [`NumberGenerator::reset`] is called.
pub struct NumberGenerator {
    state: Mutex<GeneratorState>,
}

struct GeneratorState {
    rng: StdRng,
    issued: HashMap<String, HashSet<u16>>,
}

impl NumberGenerator {
    /// A generator seeded from system entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A generator whose output is reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        NumberGenerator {
            state: Mutex::new(GeneratorState {
                rng,
                issued: HashMap::new(),
            }),
        }
    }

    /// Generate a test number. `country` defaults to `US`, `area_code` to `500`.
    ///
    /// Any country is accepted; it is only logged, since the number shape
    /// is the same everywhere.
    pub fn generate(&self, country: Option<&str>, area_code: Option<&str>) -> Result<String> {
        let area_code = validate_area_code(area_code.unwrap_or(DEFAULT_AREA_CODE))?;
        let prefix = format!("{TEST_NUMBER_PREFIX}{area_code}{RESERVED_EXCHANGE}");
        tracing::trace!(
            "Generating number for {} under {}",
            country.unwrap_or(DEFAULT_COUNTRY),
            prefix
        );

        let mut state = self.state.lock();
        let start = state.rng.gen_range(0..SUFFIX_SPACE);
        let GeneratorState { issued, .. } = &mut *state;
        let used = issued.entry(prefix.clone()).or_default();
        let suffix = (0..SUFFIX_SPACE)
            .map(|step| (start + step) % SUFFIX_SPACE)
            .find(|candidate| !used.contains(candidate))
            .ok_or_else(|| Error::NumbersExhausted(prefix.clone()))?;
        used.insert(suffix);

        Ok(format!("{prefix}{suffix:04}"))
    }

    /// A fresh message SID (`SM...`).
    pub fn message_sid(&self) -> Sid {
        self.sid(MESSAGE_PREFIX)
    }

    /// A fresh incoming phone number SID (`PN...`).
    pub fn incoming_number_sid(&self) -> Sid {
        self.sid(INCOMING_NUMBER_PREFIX)
    }

    /// Generate a fresh SID with one of the known two-letter prefixes.
    fn sid(&self, prefix: &str) -> Sid {
        const ALPHABET: &[u8] = b"0123456789abcdef";
        let mut state = self.state.lock();
        let body: String = (0..SID_BODY_LEN)
            .map(|_| ALPHABET[state.rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Sid::from_parts(prefix, &body)
    }

    /// Forget every number issued so far.
    pub fn reset(&self) {
        self.state.lock().issued.clear();
    }
}

impl Default for NumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NumberGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let issued: usize = self.state.lock().issued.values().map(HashSet::len).sum();
        f.debug_struct("NumberGenerator")
            .field("issued", &issued)
            .finish()
    }
}
