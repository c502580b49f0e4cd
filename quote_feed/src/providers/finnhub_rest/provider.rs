use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shared_utils::env::{get_env_var, get_optional_env_var};
use snafu::ResultExt;
use tracing::{debug, error, warn};

use crate::{
    models::{bar_series::BarSeries, quote::MarketStatus, quote::NormalizedQuote},
    providers::{
        ClientBuildSnafu, HttpSnafu, ParseSnafu, ProviderError, ProviderInitError, QuoteProvider,
        RequestSnafu, StatusSnafu,
        finnhub_rest::{
            normalize::{has_price_field, normalize_candles, normalize_quote},
            params::{CandleQuery, Resolution, SymbolQuery, candle_window},
            response::{FinnhubCandles, FinnhubProfile, FinnhubQuote},
        },
    },
};

pub const BASE_URL: &str = "https://finnhub.io/api/v1";
pub const API_KEY_VAR: &str = "FINNHUB_API_KEY";
pub const BASE_URL_VAR: &str = "FINNHUB_BASE_URL";
/// Symbol used by the connectivity probe and the market status call.
pub const PROBE_SYMBOL: &str = "AAPL";

const QUOTE_PATH: &str = "/quote";
const PROFILE_PATH: &str = "/stock/profile2";
const CANDLE_PATH: &str = "/stock/candle";

/// Connection settings for [`FinnhubProvider`].
#[derive(Debug, Clone)]
pub struct FinnhubConfig {
    pub base_url: String,
    /// `None` is allowed: requests are still sent and the vendor rejects them.
    pub api_key: Option<SecretString>,
    /// Client-side pacing. Finnhub's free tier allows 60 calls per minute.
    pub requests_per_minute: NonZeroU32,
    pub timeout: Duration,
}

impl Default for FinnhubConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            api_key: None,
            requests_per_minute: nonzero!(60u32),
            timeout: Duration::from_secs(10),
        }
    }
}

impl FinnhubConfig {
    /// Reads `FINNHUB_API_KEY` and, if set, `FINNHUB_BASE_URL`.
    ///
    /// A missing key is logged, not returned: the provider still builds and
    /// each request then fails on the vendor side.
    pub fn from_env() -> Self {
        let api_key = match get_env_var(API_KEY_VAR) {
            Ok(key) => Some(SecretString::new(key.into())),
            Err(e) => {
                warn!(error = %e, "Finnhub API key not found; requests will be rejected");
                None
            }
        };

        Self {
            base_url: get_optional_env_var(BASE_URL_VAR).unwrap_or_else(|| BASE_URL.to_string()),
            api_key,
            ..Self::default()
        }
    }
}

/// Finnhub-backed [`QuoteProvider`].
///
/// Holds only the HTTP client, base URL, key and rate limiter; construct one
/// per consumer and share it behind an `Arc`.
pub struct FinnhubProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    limiter: DefaultDirectRateLimiter,
}

impl FinnhubProvider {
    /// Creates a new Finnhub provider from environment settings.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_config(FinnhubConfig::from_env())
    }

    pub fn with_config(config: FinnhubConfig) -> Result<Self, ProviderInitError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config
                .api_key
                .unwrap_or_else(|| SecretString::new(String::new().into())),
            limiter: RateLimiter::direct(Quota::per_minute(config.requests_per_minute)),
        })
    }

    /// Coarse market status from the probe symbol's quote timestamp.
    pub async fn market_status(&self) -> Result<MarketStatus, ProviderError> {
        let query = self.symbol_query(PROBE_SYMBOL);
        let response = self.get(QUOTE_PATH, &query).await?;
        ensure_success(&response)?;

        let quote: FinnhubQuote = read_json(response).await?;
        Ok(MarketStatus::from_timestamp(quote.timestamp))
    }

    fn symbol_query<'a>(&'a self, symbol: &'a str) -> SymbolQuery<'a> {
        SymbolQuery {
            symbol,
            token: self.api_key.expose_secret(),
        }
    }

    async fn get<Q>(&self, path: &str, query: &Q) -> Result<Response, ProviderError>
    where
        Q: Serialize + Sync + ?Sized,
    {
        self.limiter.until_ready().await;
        debug!(path, "finnhub request");

        self.client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await
            .context(RequestSnafu)
    }

    async fn quote_and_profile(&self, symbol: &str) -> Result<NormalizedQuote, ProviderError> {
        let query = self.symbol_query(symbol);
        let (quote_response, profile_response) = tokio::try_join!(
            self.get(QUOTE_PATH, &query),
            self.get(PROFILE_PATH, &query)
        )?;

        let quote_status = quote_response.status();
        let profile_status = profile_response.status();
        if !quote_status.is_success() || !profile_status.is_success() {
            return HttpSnafu {
                quote_status,
                profile_status,
            }
            .fail();
        }

        let quote: FinnhubQuote = read_json(quote_response).await?;
        let profile: FinnhubProfile = read_json(profile_response).await?;
        Ok(normalize_quote(&quote, &profile, symbol))
    }

    async fn candles(
        &self,
        symbol: &str,
        interval: &str,
        outputsize: u32,
    ) -> Result<BarSeries, ProviderError> {
        let resolution = Resolution::from_interval(interval);
        let (from, to) = candle_window(Utc::now().timestamp(), outputsize, resolution);
        let query = CandleQuery {
            symbol,
            resolution: resolution.token(),
            from,
            to,
            token: self.api_key.expose_secret(),
        };

        let response = self.get(CANDLE_PATH, &query).await?;
        ensure_success(&response)?;

        let candles: FinnhubCandles = read_json(response).await?;
        normalize_candles(candles, symbol, resolution)
    }
}

#[async_trait]
impl QuoteProvider for FinnhubProvider {
    async fn fetch_quote(&self, symbol: &str) -> Result<NormalizedQuote, ProviderError> {
        self.quote_and_profile(symbol)
            .await
            .inspect_err(|e| error!(symbol, error = %e, "failed to fetch quote"))
    }

    async fn fetch_time_series(
        &self,
        symbol: &str,
        interval: &str,
        outputsize: u32,
    ) -> Result<BarSeries, ProviderError> {
        self.candles(symbol, interval, outputsize)
            .await
            .inspect_err(|e| error!(symbol, interval, error = %e, "failed to fetch time series"))
    }

    async fn check_connection(&self) -> bool {
        let query = self.symbol_query(PROBE_SYMBOL);
        let response = match self.get(QUOTE_PATH, &query).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "connection test failed");
                return false;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "connection test rejected");
            return false;
        }

        match read_json::<Value>(response).await {
            Ok(body) => has_price_field(&body),
            Err(e) => {
                warn!(error = %e, "connection test returned an unreadable body");
                false
            }
        }
    }
}

fn ensure_success(response: &Response) -> Result<(), ProviderError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        StatusSnafu { status }.fail()
    }
}

/// Reads the body first so transport and decode failures stay distinct.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let body = response.bytes().await.context(RequestSnafu)?;
    serde_json::from_slice(&body).context(ParseSnafu)
}
