//! # tracker_core
//!
//! Core domain logic for Crypto Tracker: turning free text into a coin
//! identifier, quoting it, and falling back to a chat agent otherwise.

pub mod agent;
pub mod coingecko;
pub mod coins;
pub mod market;
pub mod price;

#[cfg(test)]
mod test_support;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
