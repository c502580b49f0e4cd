//! Synthetic bid/ask spread.
//!
//! The quote vendor publishes no spread, so the board shows a value drawn from
//! a range chosen by symbol class. It is decoration for the table: it carries
//! no market information and must never feed pricing or order logic.

use std::ops::Range;

use rand::Rng;

pub const MAJOR_PAIRS: [&str; 4] = ["EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF"];
pub const MAJOR_STOCKS: [&str; 5] = ["AAPL", "GOOGL", "MSFT", "AMZN", "TSLA"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    /// Major currency pair, spread in pips.
    MajorPair,
    /// Large-cap stock, spread in dollars.
    MajorStock,
    Other,
}

impl SymbolClass {
    pub fn of(symbol: &str) -> Self {
        if MAJOR_PAIRS.contains(&symbol) {
            SymbolClass::MajorPair
        } else if MAJOR_STOCKS.contains(&symbol) {
            SymbolClass::MajorStock
        } else {
            SymbolClass::Other
        }
    }

    pub fn spread_range(self) -> Range<f64> {
        match self {
            SymbolClass::MajorPair => 0.8..1.6,
            SymbolClass::MajorStock => 0.01..0.03,
            SymbolClass::Other => 1.5..3.0,
        }
    }
}

/// Draws a spread for `symbol` from its class range.
pub fn synthesize_spread<R: Rng>(symbol: &str, rng: &mut R) -> f64 {
    rng.random_range(SymbolClass::of(symbol).spread_range())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn classifies_symbols() {
        assert_eq!(SymbolClass::of("EUR/USD"), SymbolClass::MajorPair);
        assert_eq!(SymbolClass::of("TSLA"), SymbolClass::MajorStock);
        assert_eq!(SymbolClass::of("NVDA"), SymbolClass::Other);
        // exact match only
        assert_eq!(SymbolClass::of("aapl"), SymbolClass::Other);
    }

    #[test]
    fn spreads_stay_in_class_ranges() {
        let mut rng = StdRng::seed_from_u64(0xfeed);
        for _ in 0..1_000 {
            let pair = synthesize_spread("EUR/USD", &mut rng);
            assert!((0.8..1.6).contains(&pair), "EUR/USD spread {pair}");

            let stock = synthesize_spread("AAPL", &mut rng);
            assert!((0.01..0.03).contains(&stock), "AAPL spread {stock}");

            let other = synthesize_spread("BTC/EUR", &mut rng);
            assert!((1.5..3.0).contains(&other), "other spread {other}");
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first: Vec<f64> = (0..5).map(|_| synthesize_spread("GBP/USD", &mut a)).collect();
        let second: Vec<f64> = (0..5).map(|_| synthesize_spread("GBP/USD", &mut b)).collect();
        assert_eq!(first, second);
    }
}
