//! Fixed sample table shown in demo mode.

use quote_feed::DisplayRecord;

/// `(symbol, price, change, change %, high, low, spread, volume)`
const SAMPLE_ROWS: [(&str, f64, f64, f64, f64, f64, f64, u64); 6] = [
    ("AAPL", 175.43, 2.34, 1.35, 176.12, 173.45, 0.02, 125_000),
    ("GOOGL", 142.67, -1.23, -0.85, 144.56, 141.89, 0.03, 98_000),
    ("MSFT", 378.92, 4.56, 1.22, 380.45, 375.23, 0.04, 156_000),
    ("TSLA", 234.56, -3.21, -1.35, 238.77, 232.11, 0.05, 67_000),
    ("AMZN", 151.23, 1.87, 1.25, 152.34, 149.45, 0.03, 78_000),
    ("NVDA", 456.78, 12.34, 2.78, 459.12, 445.67, 0.06, 54_000),
];

/// Symbols the board watches when none are configured.
pub const DEFAULT_SYMBOLS: [&str; 6] = ["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN", "NVDA"];

/// The six demo rows, in [`DEFAULT_SYMBOLS`] order.
pub fn sample_records() -> Vec<DisplayRecord> {
    SAMPLE_ROWS
        .iter()
        .map(
            |&(pair, price, change, change_percent, high, low, spread, volume)| DisplayRecord {
                pair: pair.to_string(),
                price,
                change,
                change_percent,
                high,
                low,
                spread,
                volume,
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_covers_default_symbols_in_order() {
        let pairs: Vec<String> = sample_records().into_iter().map(|r| r.pair).collect();
        assert_eq!(pairs, DEFAULT_SYMBOLS);
    }

    #[test]
    fn sample_rows_are_internally_consistent() {
        for record in sample_records() {
            assert!(record.low <= record.price && record.price <= record.high, "{record:?}");
            assert_eq!(record.change > 0.0, record.change_percent > 0.0, "{record:?}");
        }
    }
}
