//! Simulated Twilio endpoints and their request parameters.

mod types;

pub use types::*;
