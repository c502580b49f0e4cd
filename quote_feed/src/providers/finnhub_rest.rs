//! Finnhub REST provider.
//!
//! Finnhub has no bulk quote endpoint and splits a quote across `/quote` and
//! `/stock/profile2`, so one normalized quote costs two requests.

pub mod normalize;
pub mod params;
pub mod provider;
pub mod response;

pub use params::Resolution;
pub use provider::{FinnhubConfig, FinnhubProvider};
