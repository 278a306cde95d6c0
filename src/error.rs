//! Error taxonomy shared by the adapters, the cycle runner and the binary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Provider fetch failed or returned bars we refuse to compute over.
    #[error("market data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Evaluation of one symbol panicked; the rest of the cycle carries on.
    #[error("evaluation of {symbol} panicked: {message}")]
    EvaluationPanicked { symbol: String, message: String },

    #[error("notification delivery failed: {0}")]
    NotifyUnavailable(String),

    #[error("required configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("invalid value for {key}: '{value}'")]
    InvalidConfiguration { key: String, value: String },
}

impl ScanError {
    pub fn data_unavailable(symbol: &str, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    /// Short label used in logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => "data_unavailable",
            Self::EvaluationPanicked { .. } => "evaluation_panicked",
            Self::NotifyUnavailable(_) => "notify_unavailable",
            Self::ConfigurationMissing(_) => "configuration_missing",
            Self::InvalidConfiguration { .. } => "invalid_configuration",
        }
    }

    /// Only startup configuration problems end the process.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationMissing(_) | Self::InvalidConfiguration { .. }
        )
    }
}
