//! Quote feed: vendor quote client, normalizer and display conversion.
//!
//! - [`providers`] defines [`QuoteProvider`] and the Finnhub implementation.
//! - [`models`] holds the vendor-agnostic shapes ([`NormalizedQuote`],
//!   [`DisplayRecord`], bars and timeframes).
//! - [`utils`] has the session-hours check and spread synthesis.

pub mod models;
pub mod providers;
pub mod utils;

pub use models::{display::DisplayRecord, quote::NormalizedQuote};
pub use providers::{ProviderError, QuoteProvider};
