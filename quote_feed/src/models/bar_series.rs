//! A collection of time-series bars for a specific symbol and timeframe.

use serde::{Deserialize, Serialize};

use crate::models::{bar::Bar, timeframe::TimeFrame};

/// Represents a complete set of time-series data for a single symbol.
///
/// This struct groups a vector of [`Bar`]s with their corresponding symbol
/// and [`TimeFrame`], making the data set self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// The bar size the vendor actually served, which can be coarser than
    /// the interval that was asked for.
    pub timeframe: TimeFrame,
    /// The collection of OHLCV bars, oldest first.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn latest(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
