use serde::{Deserialize, Deserializer};

/// `GET /quote` body.
///
/// Finnhub answers unknown symbols with zeros or `null`s instead of an error,
/// so every field deserializes to zero when missing or null.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FinnhubQuote {
    #[serde(rename = "c", default, deserialize_with = "zero_if_null")]
    pub current: f64,
    #[serde(rename = "d", default, deserialize_with = "zero_if_null")]
    pub change: f64,
    #[serde(rename = "dp", default, deserialize_with = "zero_if_null")]
    pub percent_change: f64,
    #[serde(rename = "h", default, deserialize_with = "zero_if_null")]
    pub high: f64,
    #[serde(rename = "l", default, deserialize_with = "zero_if_null")]
    pub low: f64,
    #[serde(rename = "o", default, deserialize_with = "zero_if_null")]
    pub open: f64,
    #[serde(rename = "pc", default, deserialize_with = "zero_if_null")]
    pub previous_close: f64,
    #[serde(rename = "t", default, deserialize_with = "zero_if_null")]
    pub timestamp: i64,
}

/// `GET /stock/profile2` body. Unknown symbols yield `{}`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinnhubProfile {
    pub name: Option<String>,
    pub ticker: Option<String>,
    pub exchange: Option<String>,
    pub currency: Option<String>,
    pub country: Option<String>,
    pub ipo: Option<String>,
    pub market_capitalization: Option<f64>,
    pub share_outstanding: Option<f64>,
    pub weburl: Option<String>,
}

/// `GET /stock/candle` body: parallel arrays, one entry per bar.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FinnhubCandles {
    #[serde(rename = "o", default)]
    pub open: Vec<f64>,
    #[serde(rename = "h", default)]
    pub high: Vec<f64>,
    #[serde(rename = "l", default)]
    pub low: Vec<f64>,
    #[serde(rename = "c", default)]
    pub close: Vec<f64>,
    #[serde(rename = "v", default)]
    pub volume: Vec<f64>,
    #[serde(rename = "t", default)]
    pub timestamps: Vec<i64>,
    /// `"ok"`, or `"no_data"` when the window is empty.
    #[serde(rename = "s", default)]
    pub status: String,
}

pub const NO_DATA: &str = "no_data";

fn zero_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
