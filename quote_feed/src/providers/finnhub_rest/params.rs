use serde::Serialize;

use crate::models::timeframe::TimeFrame;

/// Finnhub candle resolutions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resolution {
    #[default]
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
    TwoHours,
    FourHours,
    Day,
    Week,
    Month,
}

impl Resolution {
    /// Maps a dashboard interval token to a resolution.
    ///
    /// Only the exact tokens of the dashboard table are recognized; anything
    /// else (including padded or abbreviated spellings) is served at one
    /// minute. `45min` has no Finnhub equivalent and is served hourly.
    pub fn from_interval(interval: &str) -> Self {
        match interval {
            "1min" => Resolution::OneMinute,
            "5min" => Resolution::FiveMinutes,
            "15min" => Resolution::FifteenMinutes,
            "30min" => Resolution::ThirtyMinutes,
            "45min" | "1h" => Resolution::SixtyMinutes,
            "2h" => Resolution::TwoHours,
            "4h" => Resolution::FourHours,
            "1day" => Resolution::Day,
            "1week" => Resolution::Week,
            "1month" => Resolution::Month,
            _ => Resolution::default(),
        }
    }

    /// The `resolution` query value.
    pub const fn token(self) -> &'static str {
        match self {
            Resolution::OneMinute => "1",
            Resolution::FiveMinutes => "5",
            Resolution::FifteenMinutes => "15",
            Resolution::ThirtyMinutes => "30",
            Resolution::SixtyMinutes => "60",
            Resolution::TwoHours => "120",
            Resolution::FourHours => "240",
            Resolution::Day => "D",
            Resolution::Week => "W",
            Resolution::Month => "M",
        }
    }

    /// The bar size actually served at this resolution.
    pub const fn timeframe(self) -> TimeFrame {
        match self {
            Resolution::OneMinute => TimeFrame::minutes(1),
            Resolution::FiveMinutes => TimeFrame::minutes(5),
            Resolution::FifteenMinutes => TimeFrame::minutes(15),
            Resolution::ThirtyMinutes => TimeFrame::minutes(30),
            Resolution::SixtyMinutes => TimeFrame::hours(1),
            Resolution::TwoHours => TimeFrame::hours(2),
            Resolution::FourHours => TimeFrame::hours(4),
            Resolution::Day => TimeFrame::day(),
            Resolution::Week => TimeFrame::week(),
            Resolution::Month => TimeFrame::month(),
        }
    }

    pub const fn seconds(self) -> i64 {
        self.timeframe().seconds()
    }
}

/// `[from, to]` in unix seconds covering `outputsize` bars ending at `to`.
pub fn candle_window(to: i64, outputsize: u32, resolution: Resolution) -> (i64, i64) {
    let span = i64::from(outputsize).saturating_mul(resolution.seconds());
    (to.saturating_sub(span), to)
}

/// Query for the per-symbol endpoints (`/quote`, `/stock/profile2`).
#[derive(Clone, Debug, Serialize)]
pub struct SymbolQuery<'a> {
    pub symbol: &'a str,
    pub token: &'a str,
}

/// Query for `/stock/candle`.
#[derive(Clone, Debug, Serialize)]
pub struct CandleQuery<'a> {
    pub symbol: &'a str,
    pub resolution: &'static str,
    pub from: i64,
    pub to: i64,
    pub token: &'a str,
}
