//! Telegram Bot API notifier

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::config::TelegramConfig;
use crate::error::ScanError;
use crate::services::notifier::Notifier;

pub struct TelegramNotifier {
    api_url: String,
    token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: &TelegramConfig, client: reqwest::Client) -> Self {
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            chat_id: config.chat_id.clone(),
            client,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), ScanError> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);
        let form = [
            ("chat_id", self.chat_id.as_str()),
            ("text", message),
            ("parse_mode", "HTML"),
        ];

        self.client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ScanError::NotifyUnavailable(describe(&e)))?
            .error_for_status()
            .map_err(|e| ScanError::NotifyUnavailable(describe(&e)))?;

        debug!(chat_id = %self.chat_id, "Telegram: message delivered");
        Ok(())
    }
}

/// reqwest's Display includes the URL, and the URL embeds the bot token.
fn describe(error: &reqwest::Error) -> String {
    if let Some(status) = error.status() {
        format!("telegram responded {status}")
    } else if error.is_timeout() {
        "telegram request timed out".to_string()
    } else if error.is_connect() {
        "could not connect to telegram".to_string()
    } else {
        "telegram request failed".to_string()
    }
}
