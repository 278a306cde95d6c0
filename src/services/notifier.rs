//! Outbound notification channel.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::ScanError;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), ScanError>;
}

/// Deliver `message`, giving up after `limit`. A timeout is reported as
/// [`ScanError::NotifyUnavailable`] like any other delivery failure.
pub async fn notify_within(
    notifier: &dyn Notifier,
    message: &str,
    limit: Duration,
) -> Result<(), ScanError> {
    tokio::time::timeout(limit, notifier.notify(message))
        .await
        .map_err(|_| ScanError::NotifyUnavailable(format!("no response within {limit:?}")))?
}
