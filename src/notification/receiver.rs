//! Background push delivery.
//!
//! Renders one system notification per push message. A payload without
//! `notification.title` / `notification.body` is logged and dropped; nothing
//! is rendered for it.

use std::sync::Arc;

use crate::notification::payload::{PushError, PushPayload};
use crate::notification::platform::{NotificationOptions, NotificationRef, Platform};
use crate::observability::metrics;

pub struct PushReceiver {
    platform: Arc<dyn Platform>,
    icon: String,
}

impl PushReceiver {
    pub fn new(platform: Arc<dyn Platform>, icon: impl Into<String>) -> Self {
        Self {
            platform,
            icon: icon.into(),
        }
    }

    /// Display the notification described by `payload`.
    ///
    /// Resolves only after the platform acknowledges the notification.
    pub async fn handle(&self, payload: PushPayload) -> Result<NotificationRef, PushError> {
        tracing::debug!(data_keys = payload.data.len(), "Background message received");

        let (title, body) = match payload.title_and_body() {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!(error = %e, "Dropping push message");
                metrics::record_notification("malformed");
                return Err(e);
            }
        };

        let options = NotificationOptions {
            title: title.to_string(),
            body: body.to_string(),
            icon: self.icon.clone(),
            data: payload.data.clone(),
        };

        match self.platform.display(options).await {
            Ok(notification) => {
                tracing::info!(notification = %notification.0, title = %title, "Notification displayed");
                metrics::record_notification("displayed");
                Ok(notification)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to display notification");
                metrics::record_notification("failed");
                Err(e.into())
            }
        }
    }
}
