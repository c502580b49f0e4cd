//! Compact price row rendered in a market table.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{models::quote::NormalizedQuote, utils::spread::synthesize_spread};

/// One row of the market board: price, moves, range, spread and volume.
///
/// `spread` is synthesized (see [`synthesize_spread`]) and has no market
/// meaning; every other field comes from the quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub pair: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub high: f64,
    pub low: f64,
    pub spread: f64,
    pub volume: u64,
}

impl DisplayRecord {
    /// Parses the quote's string fields back into numbers.
    ///
    /// Unparsable numbers become zero so a malformed quote still yields a row.
    pub fn from_quote<R: Rng>(quote: &NormalizedQuote, rng: &mut R) -> Self {
        let price = parse_decimal(&quote.close);
        Self {
            pair: quote.symbol.clone(),
            price,
            change: parse_decimal(&quote.change),
            change_percent: parse_decimal(&quote.percent_change),
            high: parse_decimal(&quote.high),
            low: parse_decimal(&quote.low),
            spread: synthesize_spread(&quote.symbol, rng),
            volume: quote.volume.trim().parse().unwrap_or(0),
        }
    }

    pub fn is_up(&self) -> bool {
        self.change > 0.0
    }

    pub fn is_down(&self) -> bool {
        self.change < 0.0
    }
}

fn parse_decimal(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}
