//! Finnhub payloads → crate models.

use serde_json::Value;

use crate::{
    models::{
        bar::Bar,
        bar_series::BarSeries,
        quote::{FiftyTwoWeek, NormalizedQuote, ZERO},
    },
    providers::{
        CandleShapeSnafu, NoDataSnafu, ProviderError,
        finnhub_rest::{
            params::Resolution,
            response::{FinnhubCandles, FinnhubProfile, FinnhubQuote, NO_DATA},
        },
    },
    utils::market_hours::{is_market_open, iso_datetime, utc_from_unix},
};

pub const DEFAULT_EXCHANGE: &str = "NASDAQ";
pub const DEFAULT_MIC_CODE: &str = "XNAS";
pub const DEFAULT_CURRENCY: &str = "USD";

/// Merges a quote and its profile into a [`NormalizedQuote`].
///
/// `symbol` is copied verbatim; the vendor's own ticker spelling is ignored.
/// Missing profile fields fall back to Nasdaq/USD defaults, and volume plus
/// the 52-week block are zero-filled because `/quote` does not carry them.
pub fn normalize_quote(
    quote: &FinnhubQuote,
    profile: &FinnhubProfile,
    symbol: &str,
) -> NormalizedQuote {
    let exchange = non_empty(&profile.exchange);

    NormalizedQuote {
        symbol: symbol.to_string(),
        name: non_empty(&profile.name).unwrap_or(symbol).to_string(),
        exchange: exchange.unwrap_or(DEFAULT_EXCHANGE).to_string(),
        mic_code: exchange.unwrap_or(DEFAULT_MIC_CODE).to_string(),
        currency: non_empty(&profile.currency)
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string(),
        datetime: iso_datetime(quote.timestamp),
        timestamp: quote.timestamp,
        open: quote.open.to_string(),
        high: quote.high.to_string(),
        low: quote.low.to_string(),
        close: quote.current.to_string(),
        volume: ZERO.to_string(),
        previous_close: quote.previous_close.to_string(),
        change: quote.change.to_string(),
        percent_change: quote.percent_change.to_string(),
        average_volume: ZERO.to_string(),
        is_market_open: is_market_open(quote.timestamp),
        fifty_two_week: FiftyTwoWeek::unavailable(),
    }
}

/// Zips the parallel candle arrays into bars.
///
/// # Errors
/// - [`ProviderError::NoData`] when the vendor reports `no_data`.
/// - [`ProviderError::CandleShape`] when the arrays differ in length.
pub fn normalize_candles(
    candles: FinnhubCandles,
    symbol: &str,
    resolution: Resolution,
) -> Result<BarSeries, ProviderError> {
    if candles.status == NO_DATA {
        return NoDataSnafu { symbol }.fail();
    }

    let len = candles.timestamps.len();
    let lengths = [
        candles.open.len(),
        candles.high.len(),
        candles.low.len(),
        candles.close.len(),
        candles.volume.len(),
    ];
    if lengths.iter().any(|&n| n != len) {
        return CandleShapeSnafu {
            symbol,
            message: format!("expected {len} values per field, got o/h/l/c/v = {lengths:?}"),
        }
        .fail();
    }

    let bars = (0..len)
        .map(|i| Bar {
            timestamp: utc_from_unix(candles.timestamps[i]),
            open: candles.open[i],
            high: candles.high[i],
            low: candles.low[i],
            close: candles.close[i],
            volume: candles.volume[i],
        })
        .collect();

    Ok(BarSeries {
        symbol: symbol.to_string(),
        timeframe: resolution.timeframe(),
        bars,
    })
}

/// A probe body counts as live when it carries a current price field.
pub fn has_price_field(body: &Value) -> bool {
    body.get("c").is_some()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::json;

    use super::*;
    use crate::models::{display::DisplayRecord, timeframe::TimeFrame};

    fn apple_quote() -> FinnhubQuote {
        FinnhubQuote {
            current: 189.84,
            change: 1.25,
            percent_change: 0.6628,
            high: 190.32,
            low: 188.19,
            open: 189.33,
            previous_close: 188.59,
            // 2024-01-03T20:00:00Z, a Wednesday
            timestamp: 1_704_312_000,
        }
    }

    fn apple_profile() -> FinnhubProfile {
        FinnhubProfile {
            name: Some("Apple Inc".into()),
            ticker: Some("AAPL".into()),
            exchange: Some("NASDAQ NMS - GLOBAL MARKET".into()),
            currency: Some("USD".into()),
            ..Default::default()
        }
    }

    #[test]
    fn merges_quote_and_profile() {
        let q = normalize_quote(&apple_quote(), &apple_profile(), "AAPL");

        assert_eq!(q.symbol, "AAPL");
        assert_eq!(q.name, "Apple Inc");
        assert_eq!(q.exchange, "NASDAQ NMS - GLOBAL MARKET");
        assert_eq!(q.mic_code, "NASDAQ NMS - GLOBAL MARKET");
        assert_eq!(q.datetime, "2024-01-03T20:00:00.000Z");
        assert_eq!(q.close, "189.84");
        assert_eq!(q.previous_close, "188.59");
        assert_eq!(q.percent_change, "0.6628");
        assert_eq!(q.volume, "0");
        assert_eq!(q.average_volume, "0");
        assert!(q.is_market_open);
        assert_eq!(q.fifty_two_week, FiftyTwoWeek::unavailable());
    }

    #[test]
    fn empty_profile_uses_defaults() {
        let profile = FinnhubProfile {
            name: Some(String::new()),
            ..Default::default()
        };
        let q = normalize_quote(&apple_quote(), &profile, "MSFT");

        assert_eq!(q.name, "MSFT");
        assert_eq!(q.exchange, "NASDAQ");
        assert_eq!(q.mic_code, "XNAS");
        assert_eq!(q.currency, "USD");
    }

    #[test]
    fn symbol_is_the_requested_one_not_the_vendor_ticker() {
        let profile = FinnhubProfile {
            ticker: Some("aapl".into()),
            ..apple_profile()
        };
        for requested in ["AAPL", "aapl", "AaPl"] {
            assert_eq!(normalize_quote(&apple_quote(), &profile, requested).symbol, requested);
        }
    }

    #[test]
    fn whole_prices_render_without_fraction() {
        let quote = FinnhubQuote {
            current: 175.0,
            ..apple_quote()
        };
        assert_eq!(normalize_quote(&quote, &apple_profile(), "AAPL").close, "175");
    }

    #[test]
    fn display_price_round_trips_vendor_price() {
        let mut rng = StdRng::seed_from_u64(1);
        for price in [0.0, 0.1 + 0.2, 1e-7, 189.84, 123_456_789.123_456, f64::MAX, -3.5] {
            let quote = FinnhubQuote {
                current: price,
                ..apple_quote()
            };
            let normalized = normalize_quote(&quote, &apple_profile(), "AAPL");
            let record = DisplayRecord::from_quote(&normalized, &mut rng);
            assert_eq!(record.price, price);
        }
    }

    #[test]
    fn weekend_quote_is_closed() {
        let quote = FinnhubQuote {
            // 2024-01-06T16:00:00Z, a Saturday
            timestamp: 1_704_556_800,
            ..apple_quote()
        };
        assert!(!normalize_quote(&quote, &apple_profile(), "AAPL").is_market_open);
    }

    #[test]
    fn candles_zip_into_bars() {
        let candles = FinnhubCandles {
            open: vec![1.0, 2.0],
            high: vec![1.5, 2.5],
            low: vec![0.5, 1.5],
            close: vec![1.2, 2.2],
            volume: vec![100.0, 200.0],
            timestamps: vec![1_704_312_000, 1_704_312_060],
            status: "ok".into(),
        };
        let series = normalize_candles(candles, "AAPL", Resolution::OneMinute).unwrap();

        assert_eq!(series.symbol, "AAPL");
        assert_eq!(series.timeframe, TimeFrame::minutes(1));
        assert_eq!(series.bars.len(), 2);
        assert_eq!(series.latest().unwrap().close, 2.2);
        assert_eq!(series.bars[0].timestamp.timestamp(), 1_704_312_000);
    }

    #[test]
    fn no_data_sentinel_is_an_error() {
        let candles = FinnhubCandles {
            status: NO_DATA.into(),
            ..Default::default()
        };
        let err = normalize_candles(candles, "AAPL", Resolution::Day).unwrap_err();
        assert!(matches!(err, ProviderError::NoData { ref symbol, .. } if symbol == "AAPL"));
    }

    #[test]
    fn ragged_candles_are_a_parse_error() {
        let candles = FinnhubCandles {
            open: vec![1.0],
            high: vec![1.0],
            low: vec![1.0],
            close: vec![1.0, 2.0],
            volume: vec![1.0],
            timestamps: vec![1],
            status: "ok".into(),
        };
        let err = normalize_candles(candles, "AAPL", Resolution::Day).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn connection_body_needs_a_price() {
        assert!(has_price_field(&json!({"c": 189.84, "t": 1})));
        assert!(has_price_field(&json!({"c": 0})));
        assert!(!has_price_field(&json!({"error": "Invalid API key."})));
        assert!(!has_price_field(&json!([])));
    }
}
