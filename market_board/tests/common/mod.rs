#![allow(dead_code)]

use std::{
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use quote_feed::{
    models::{bar_series::BarSeries, quote::NormalizedQuote},
    providers::{
        HttpSnafu, NoDataSnafu, ProviderError, QuoteProvider, StatusCode,
        finnhub_rest::{
            normalize::normalize_quote,
            response::{FinnhubProfile, FinnhubQuote},
        },
    },
};

/// In-process vendor: every symbol quotes at the same settable price.
pub struct FakeProvider {
    connected: bool,
    failing: AtomicBool,
    price: Mutex<f64>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn online() -> Self {
        Self {
            connected: true,
            failing: AtomicBool::new(false),
            price: Mutex::new(100.0),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn offline() -> Self {
        Self {
            connected: false,
            ..Self::online()
        }
    }

    /// Reachable, but every quote comes back as a 429.
    pub fn rejecting() -> Self {
        let provider = Self::online();
        provider.set_failing(true);
        provider
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_price(&self, price: f64) {
        *self.price.lock().unwrap() = price;
    }

    /// Number of `fetch_quote` calls so far.
    pub fn quote_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteProvider for FakeProvider {
    async fn fetch_quote(&self, symbol: &str) -> Result<NormalizedQuote, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return HttpSnafu {
                quote_status: StatusCode::TOO_MANY_REQUESTS,
                profile_status: StatusCode::OK,
            }
            .fail();
        }

        let quote = FinnhubQuote {
            current: *self.price.lock().unwrap(),
            change: 1.5,
            percent_change: 1.5,
            high: 110.0,
            low: 90.0,
            timestamp: 1_704_312_000,
            ..Default::default()
        };
        Ok(normalize_quote(&quote, &FinnhubProfile::default(), symbol))
    }

    async fn fetch_time_series(
        &self,
        symbol: &str,
        _interval: &str,
        _outputsize: u32,
    ) -> Result<BarSeries, ProviderError> {
        NoDataSnafu { symbol }.fail()
    }

    async fn check_connection(&self) -> bool {
        self.connected
    }
}

pub fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
