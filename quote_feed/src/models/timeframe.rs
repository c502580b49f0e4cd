//! Vendor-agnostic bar interval.
//!
//! Callers usually spell intervals the way the dashboard does (`"1min"`,
//! `"4h"`, `"1day"`). [`TimeFrame`] parses those tokens into an amount and a
//! unit; providers then decide which of their own resolutions to use for it.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeFrameError {
    #[error("Invalid amount for {:?}: {}", unit, message)]
    InvalidAmount {
        unit: TimeFrameUnit,
        message: String,
    },

    #[error("Invalid input: {}", message)]
    InvalidInput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFrameUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl TimeFrameUnit {
    /// Nominal length of one unit. Months are counted as 30 days.
    pub const fn seconds(self) -> i64 {
        match self {
            TimeFrameUnit::Minute => 60,
            TimeFrameUnit::Hour => 3_600,
            TimeFrameUnit::Day => 86_400,
            TimeFrameUnit::Week => 604_800,
            TimeFrameUnit::Month => 2_592_000,
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            TimeFrameUnit::Minute => "min",
            TimeFrameUnit::Hour => "h",
            TimeFrameUnit::Day => "day",
            TimeFrameUnit::Week => "week",
            TimeFrameUnit::Month => "month",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFrame {
    pub amount: u32,
    pub unit: TimeFrameUnit,
}

impl TimeFrame {
    pub const fn new(amount: u32, unit: TimeFrameUnit) -> Self {
        Self { amount, unit }
    }

    pub const fn minutes(amount: u32) -> Self {
        Self::new(amount, TimeFrameUnit::Minute)
    }

    pub const fn hours(amount: u32) -> Self {
        Self::new(amount, TimeFrameUnit::Hour)
    }

    pub const fn day() -> Self {
        Self::new(1, TimeFrameUnit::Day)
    }

    pub const fn week() -> Self {
        Self::new(1, TimeFrameUnit::Week)
    }

    pub const fn month() -> Self {
        Self::new(1, TimeFrameUnit::Month)
    }

    /// Length of one bar in seconds.
    pub const fn seconds(&self) -> i64 {
        self.amount as i64 * self.unit.seconds()
    }
}

/// Renders back into the dashboard token form (`"5min"`, `"1day"`).
impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for TimeFrame {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TimeFrameError::InvalidInput {
                message: format!("missing unit in interval {s:?}"),
            })?;
        let (digits, suffix) = s.split_at(split);

        let amount: u32 = digits.parse().map_err(|_| TimeFrameError::InvalidInput {
            message: format!("missing amount in interval {s:?}"),
        })?;

        let unit = match suffix {
            "min" | "m" => TimeFrameUnit::Minute,
            "h" | "hour" => TimeFrameUnit::Hour,
            "day" | "d" => TimeFrameUnit::Day,
            "week" | "w" => TimeFrameUnit::Week,
            "month" | "mo" => TimeFrameUnit::Month,
            _ => {
                return Err(TimeFrameError::InvalidInput {
                    message: format!("unknown interval unit {suffix:?}"),
                });
            }
        };

        if amount == 0 {
            return Err(TimeFrameError::InvalidAmount {
                unit,
                message: "amount must be greater than zero".into(),
            });
        }

        Ok(Self::new(amount, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dashboard_tokens() {
        assert_eq!("1min".parse::<TimeFrame>().unwrap(), TimeFrame::minutes(1));
        assert_eq!("45min".parse::<TimeFrame>().unwrap(), TimeFrame::minutes(45));
        assert_eq!("4h".parse::<TimeFrame>().unwrap(), TimeFrame::hours(4));
        assert_eq!("1day".parse::<TimeFrame>().unwrap(), TimeFrame::day());
        assert_eq!("1week".parse::<TimeFrame>().unwrap(), TimeFrame::week());
        assert_eq!("1month".parse::<TimeFrame>().unwrap(), TimeFrame::month());
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<TimeFrame>().is_err());
        assert!("min".parse::<TimeFrame>().is_err());
        assert!("15".parse::<TimeFrame>().is_err());
        assert!("3fortnight".parse::<TimeFrame>().is_err());
    }

    #[test]
    fn zero_amount_is_an_invalid_amount() {
        match "0min".parse::<TimeFrame>() {
            Err(TimeFrameError::InvalidAmount { unit, .. }) => {
                assert_eq!(unit, TimeFrameUnit::Minute)
            }
            other => panic!("expected InvalidAmount, got {other:?}"),
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for tf in [TimeFrame::minutes(15), TimeFrame::hours(2), TimeFrame::day()] {
            assert_eq!(tf.to_string().parse::<TimeFrame>().unwrap(), tf);
        }
    }

    #[test]
    fn seconds_scale_with_amount() {
        assert_eq!(TimeFrame::minutes(5).seconds(), 300);
        assert_eq!(TimeFrame::hours(4).seconds(), 14_400);
        assert_eq!(TimeFrame::month().seconds(), 2_592_000);
    }
}
