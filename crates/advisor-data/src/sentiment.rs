//! Sentiment providers.

use advisor_core::error::DataError;
use advisor_core::traits::SentimentProvider;
use advisor_core::types::SentimentSignal;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

/// Always neutral. Used when no sentiment source is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralSentiment;

#[async_trait]
impl SentimentProvider for NeutralSentiment {
    async fn fetch_sentiment(&self, _symbol: &str) -> Result<SentimentSignal, DataError> {
        Ok(SentimentSignal::neutral())
    }

    fn name(&self) -> &str {
        "neutral"
    }
}

/// Fixed per-symbol signals.
///
/// Unknown symbols read as neutral.
#[derive(Debug, Clone, Default)]
pub struct StaticSentiment {
    signals: HashMap<String, SentimentSignal>,
}

impl StaticSentiment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signal(mut self, symbol: &str, signal: SentimentSignal) -> Self {
        self.signals.insert(symbol.to_uppercase(), signal);
        self
    }

    /// Build from per-symbol headline polarity scores.
    pub fn from_polarities(polarities: HashMap<String, Vec<f64>>) -> Self {
        let signals = polarities
            .into_iter()
            .map(|(symbol, scores)| (symbol.to_uppercase(), SentimentSignal::from_polarities(&scores)))
            .collect();
        Self { signals }
    }

    /// Load a JSON object mapping symbols to arrays of polarity scores.
    pub fn from_json_file(path: &Path) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DataError::ConnectionError(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, DataError> {
        let polarities: HashMap<String, Vec<f64>> =
            serde_json::from_str(text).map_err(|e| DataError::ParseError(e.to_string()))?;
        Ok(Self::from_polarities(polarities))
    }
}

#[async_trait]
impl SentimentProvider for StaticSentiment {
    async fn fetch_sentiment(&self, symbol: &str) -> Result<SentimentSignal, DataError> {
        Ok(self
            .signals
            .get(&symbol.to_uppercase())
            .copied()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "static"
    }
}
