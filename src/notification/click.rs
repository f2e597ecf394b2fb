//! Notification click routing.
//!
//! Per click, strictly in order:
//! 1. dismiss the clicked notification
//! 2. enumerate open views (fresh every time, uncontrolled views included)
//! 3. focus the first view showing the deep-link target, or
//! 4. open a new view at the target, if the platform can open views
//!
//! Exactly one of focus/open happens, except when no view matches and the
//! platform cannot open one; then the click ends with no navigation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notification::platform::{NotificationRef, Platform, PlatformError, ViewHandle, ViewQuery};
use crate::observability::metrics;

/// A user activating a rendered notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub notification: NotificationRef,
}

impl ClickEvent {
    pub fn new(notification: NotificationRef) -> Self {
        Self { notification }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An already-open view was brought to the foreground.
    Focused(ViewHandle),
    /// A new view was opened at the given URL.
    Opened(String),
    /// No view matched and the platform cannot open one.
    NoNavigation,
}

impl ClickOutcome {
    fn label(&self) -> &'static str {
        match self {
            ClickOutcome::Focused(_) => "focused",
            ClickOutcome::Opened(_) => "opened",
            ClickOutcome::NoNavigation => "no_navigation",
        }
    }
}

#[derive(Debug, Error)]
pub enum ClickError {
    #[error("failed to enumerate views: {0}")]
    Enumerate(#[source] PlatformError),

    #[error("failed to focus view: {0}")]
    Focus(#[source] PlatformError),

    #[error("failed to open view: {0}")]
    Open(#[source] PlatformError),
}

pub struct ClickRouter {
    platform: Arc<dyn Platform>,
    target: String,
}

impl ClickRouter {
    /// `target` is the absolute deep-link URL views are compared against.
    pub fn new(platform: Arc<dyn Platform>, target: url::Url) -> Self {
        Self {
            platform,
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub async fn handle(&self, event: ClickEvent) -> Result<ClickOutcome, ClickError> {
        if let Err(e) = self.platform.dismiss(&event.notification).await {
            tracing::warn!(notification = %event.notification.0, error = %e, "Failed to dismiss notification");
        }

        let views = self
            .platform
            .enumerate_views(ViewQuery::all_windows())
            .await
            .map_err(ClickError::Enumerate)?;

        let outcome = match select_view(&views, &self.target) {
            Some(view) => {
                self.platform.focus(view).await.map_err(ClickError::Focus)?;
                ClickOutcome::Focused(view.clone())
            }
            None if self.platform.can_open_views() => {
                self.platform
                    .open_new(&self.target)
                    .await
                    .map_err(ClickError::Open)?;
                ClickOutcome::Opened(self.target.clone())
            }
            None => {
                tracing::debug!("Platform cannot open views, click ends without navigation");
                ClickOutcome::NoNavigation
            }
        };

        tracing::info!(
            notification = %event.notification.0,
            open_views = views.len(),
            outcome = outcome.label(),
            "Notification click handled"
        );
        metrics::record_click(outcome.label());
        Ok(outcome)
    }
}

/// First focusable view showing exactly `target`, in enumeration order.
pub fn select_view<'a>(views: &'a [ViewHandle], target: &str) -> Option<&'a ViewHandle> {
    views.iter().find(|v| v.url == target && v.focusable)
}
