//! Outbound notifications to account holders.
//!
//! Delivery transport lives outside this service; the [`Notifier`] trait is
//! the seam. [`LogNotifier`] records that a message would have been sent and
//! is what the server runs with by default.

use async_trait::async_trait;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to notify {recipient}: {reason}")]
    Delivery { recipient: String, reason: String },
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a freshly generated password to `email`.
    async fn send_generated_password(
        &self,
        first_name: &str,
        password: &str,
        email: &str,
    ) -> Result<(), NotifyError>;
}

/// Logs the recipient of each notification. Never logs the password.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_generated_password(
        &self,
        first_name: &str,
        _password: &str,
        email: &str,
    ) -> Result<(), NotifyError> {
        info!(
            notify.recipient = %email,
            notify.first_name = %first_name,
            "Generated password notification sent"
        );
        Ok(())
    }
}
