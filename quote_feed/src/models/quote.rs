//! The stable quote shape every consumer reads, whichever vendor served it.
//!
//! Prices are carried as decimal strings so a quote can be handed to a JSON
//! consumer untouched. Fields the vendor cannot supply are zero-filled rather
//! than omitted: downstream code may assume every field is present.

use serde::{Deserialize, Serialize};

/// Placeholder for any numeric field the vendor did not provide.
pub const ZERO: &str = "0";

/// A normalized snapshot quote for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuote {
    /// The symbol exactly as requested by the caller.
    pub symbol: String,
    /// Company or instrument display name.
    pub name: String,
    pub exchange: String,
    /// ISO 10383 market identifier.
    pub mic_code: String,
    pub currency: String,
    /// ISO-8601 UTC datetime of the quote, millisecond precision.
    pub datetime: String,
    /// Unix seconds of the quote.
    pub timestamp: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    /// Last traded price.
    pub close: String,
    pub volume: String,
    pub previous_close: String,
    pub change: String,
    pub percent_change: String,
    pub average_volume: String,
    pub is_market_open: bool,
    pub fifty_two_week: FiftyTwoWeek,
}

/// 52-week range block. Snapshot endpoints rarely provide it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiftyTwoWeek {
    pub low: String,
    pub high: String,
    pub low_change: String,
    pub high_change: String,
    pub low_change_percent: String,
    pub high_change_percent: String,
    pub range: String,
}

impl FiftyTwoWeek {
    /// The zero-filled block used when the vendor has no 52-week data.
    pub fn unavailable() -> Self {
        Self {
            low: ZERO.into(),
            high: ZERO.into(),
            low_change: ZERO.into(),
            high_change: ZERO.into(),
            low_change_percent: ZERO.into(),
            high_change_percent: ZERO.into(),
            range: "0-0".into(),
        }
    }
}

impl Default for FiftyTwoWeek {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// Coarse open/closed flag reported by [`MarketStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketState {
    Open,
    Closed,
}

/// Market status derived from a single sentinel quote.
///
/// A vendor that has a non-zero quote timestamp is treated as trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStatus {
    pub state: MarketState,
    pub timestamp: i64,
}

impl MarketStatus {
    pub fn from_timestamp(timestamp: i64) -> Self {
        let state = if timestamp > 0 {
            MarketState::Open
        } else {
            MarketState::Closed
        };
        Self { state, timestamp }
    }
}
