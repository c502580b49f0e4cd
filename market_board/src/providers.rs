//! Provider registry that maps a configured ProviderId to a concrete quote provider
use std::sync::Arc;

use quote_feed::providers::{ProviderInitError, QuoteProvider, finnhub_rest::FinnhubProvider};
use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;

/// Which quote vendor to use (serde snake_case).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Finnhub REST API.
    #[default]
    Finnhub,
}

/// Build the provider selected by `config`, shared behind an `Arc`.
pub fn build_provider(config: &BoardConfig) -> Result<Arc<dyn QuoteProvider>, ProviderInitError> {
    match config.provider {
        ProviderId::Finnhub => {
            let p = FinnhubProvider::with_config(config.finnhub_config())?;
            Ok(Arc::new(p))
        }
    }
}
