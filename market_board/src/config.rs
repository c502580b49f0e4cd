//! Board configuration: parsing, normalization, and loading.
//!
//! The board reads an optional TOML file. Every key may be left out:
//!
//! ```toml
//! provider = "finnhub"
//! base_url = "https://finnhub.io/api/v1"
//! symbols = ["AAPL", "MSFT"]
//! poll_interval_secs = 30
//! requests_per_minute = 60
//! spread_seed = 7
//! ```
//!
//! The API key is never read from this file; it comes from
//! `FINNHUB_API_KEY` (see [`FinnhubConfig::from_env`]).
//!
//! Entrypoints:
//! - Parse + normalize from a TOML string: [`load_config_str`]
//! - Parse + normalize from a file path: [`load_config_path`]

use std::{
    collections::HashSet,
    num::{NonZeroU32, NonZeroU64},
    path::Path,
    time::Duration,
};

use anyhow::{Context, bail};
use quote_feed::providers::finnhub_rest::FinnhubConfig;
use serde::{Deserialize, Serialize};
use toml::from_str;

use crate::{board::DEFAULT_POLL_INTERVAL, demo::DEFAULT_SYMBOLS, providers::ProviderId};

/// Runtime settings for the board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct BoardConfig {
    /// Quote vendor to use.
    pub provider: ProviderId,
    /// Overrides the vendor base URL (and `FINNHUB_BASE_URL`).
    pub base_url: Option<String>,
    /// Watch list in display order.
    ///
    /// Normalized to trimmed, uppercase, unique tickers preserving order.
    pub symbols: Vec<String>,
    /// Seconds between two polls.
    pub poll_interval_secs: NonZeroU64,
    /// Outbound request budget.
    pub requests_per_minute: NonZeroU32,
    /// Fixed seed for the spread generator.
    pub spread_seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            provider: ProviderId::default(),
            base_url: None,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            poll_interval_secs: NonZeroU64::new(DEFAULT_POLL_INTERVAL.as_secs())
                .unwrap_or(NonZeroU64::MIN),
            requests_per_minute: FinnhubConfig::default().requests_per_minute,
            spread_seed: None,
        }
    }
}

impl BoardConfig {
    /// Loads `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => load_config_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Polling period as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.get())
    }

    /// Vendor settings: environment first, then this file's overrides.
    pub fn finnhub_config(&self) -> FinnhubConfig {
        let mut config = FinnhubConfig::from_env();
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        config.requests_per_minute = self.requests_per_minute;
        config
    }
}

/// Normalize a config in-place.
///
/// - Trim and uppercase every symbol; reject blanks
/// - Drop repeated symbols, keeping the first occurrence
/// - Trim `base_url`; a blank one means "not set"
///
/// Returns the number of duplicate symbols removed.
///
/// Errors:
/// - Empty symbol after trimming
/// - Empty watch list
pub fn normalize_config(config: &mut BoardConfig) -> anyhow::Result<usize> {
    let before = config.symbols.len();
    let mut seen = HashSet::new();
    let mut symbols = Vec::with_capacity(before);

    for raw in std::mem::take(&mut config.symbols) {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            bail!("symbol cannot be empty after trimming");
        }
        if seen.insert(symbol.clone()) {
            symbols.push(symbol);
        }
    }
    if symbols.is_empty() {
        bail!("watch list must contain at least one symbol");
    }
    config.symbols = symbols;

    config.base_url = config
        .base_url
        .take()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());

    Ok(before - config.symbols.len())
}

/// Parse and normalize a config from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<BoardConfig> {
    let mut config: BoardConfig = from_str(toml_str).context("failed to parse board TOML")?;
    let deduped = normalize_config(&mut config).context("normalize_config failed")?;
    if deduped > 0 {
        tracing::debug!(deduped, "dropped repeated symbols");
    }
    Ok(config)
}

/// Read a config TOML file from disk, parse, and normalize it.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<BoardConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read board config {}", path.as_ref().display()))?;
    load_config_str(&text)
}
