//! Provider abstraction for quote sources.
//!
//! This module defines the [`QuoteProvider`] trait, the unified interface for
//! fetching snapshot quotes and candle series from a market data vendor.
//! Each concrete vendor (currently [`finnhub_rest`]) implements it and maps
//! its own payloads into [`NormalizedQuote`] and [`BarSeries`].
//!
//! The trait is async and object safe, so callers can hold a
//! `dyn QuoteProvider` and swap vendors (or test doubles) at runtime.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use quote_feed::models::{bar_series::BarSeries, quote::NormalizedQuote};
//! use quote_feed::providers::{NoDataSnafu, ProviderError, QuoteProvider};
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl QuoteProvider for Offline {
//!     async fn fetch_quote(&self, symbol: &str) -> Result<NormalizedQuote, ProviderError> {
//!         NoDataSnafu { symbol }.fail()
//!     }
//!
//!     async fn fetch_time_series(
//!         &self,
//!         symbol: &str,
//!         _interval: &str,
//!         _outputsize: u32,
//!     ) -> Result<BarSeries, ProviderError> {
//!         NoDataSnafu { symbol }.fail()
//!     }
//!
//!     async fn check_connection(&self) -> bool {
//!         false
//!     }
//! }
//! ```

pub mod finnhub_rest;

use async_trait::async_trait;
use futures::future::try_join_all;
pub use reqwest::StatusCode;
use snafu::{Backtrace, Snafu};
use tracing::error;

use crate::models::{bar_series::BarSeries, quote::NormalizedQuote};

/// Trait for fetching quotes and candles from a market data vendor.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches the current quote for one symbol, merged with its static
    /// profile (name, exchange, currency).
    async fn fetch_quote(&self, symbol: &str) -> Result<NormalizedQuote, ProviderError>;

    /// Fetches the last `outputsize` candles for `symbol`.
    ///
    /// `interval` is a dashboard token such as `"5min"` or `"1day"`. Tokens the
    /// vendor does not know are served at its finest resolution.
    async fn fetch_time_series(
        &self,
        symbol: &str,
        interval: &str,
        outputsize: u32,
    ) -> Result<BarSeries, ProviderError>;

    /// Cheap reachability probe. Never fails: any problem reads as `false`.
    async fn check_connection(&self) -> bool;

    /// Fetches quotes for every symbol concurrently, in input order.
    ///
    /// All-or-nothing: the first failing symbol fails the whole batch and no
    /// partial result is returned.
    async fn fetch_quotes(
        &self,
        symbols: &[String],
    ) -> Result<Vec<NormalizedQuote>, ProviderError> {
        try_join_all(symbols.iter().map(|symbol| self.fetch_quote(symbol)))
            .await
            .inspect_err(|e| error!(error = %e, "failed to fetch quote batch"))
    }
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `QuoteProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// Transport failure (connect, timeout, body read).
    #[snafu(display("API request failed: {source}"))]
    Request {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The paired quote/profile request came back with a non-success status.
    /// Both statuses are kept even when only one of them failed.
    #[snafu(display("HTTP error! quote: {quote_status}, profile: {profile_status}"))]
    Http {
        quote_status: StatusCode,
        profile_status: StatusCode,
        backtrace: Backtrace,
    },

    /// A single-request endpoint came back with a non-success status.
    #[snafu(display("HTTP error! status: {status}"))]
    Status {
        status: StatusCode,
        backtrace: Backtrace,
    },

    /// The vendor has no candles for the requested window.
    #[snafu(display("No data available for {symbol} in the requested period"))]
    NoData { symbol: String, backtrace: Backtrace },

    /// The vendor answered with JSON we could not decode.
    #[snafu(display("Malformed vendor payload: {source}"))]
    Parse {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// Candle arrays that do not line up.
    #[snafu(display("Malformed candles for {symbol}: {message}"))]
    CandleShape {
        symbol: String,
        message: String,
        backtrace: Backtrace,
    },
}

impl ProviderError {
    /// `true` for vendor payload problems, as opposed to HTTP or transport ones.
    pub fn is_parse(&self) -> bool {
        matches!(self, ProviderError::Parse { .. } | ProviderError::CandleShape { .. })
    }
}
