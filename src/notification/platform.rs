//! Capabilities the hosting platform lends to the notification handlers.
//!
//! Handlers never touch windows or the notification tray directly; they go
//! through [`Platform`], which the host implements once and hands over at
//! registration time.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One open instance of the application's user-facing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewHandle {
    /// Platform-assigned identifier.
    pub id: String,
    /// URL currently shown by the view.
    pub url: String,
    /// Whether the platform can bring this view to the foreground.
    pub focusable: bool,
}

impl ViewHandle {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            focusable: true,
        }
    }
}

/// Reference to a rendered notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationRef(pub String);

/// What the platform should render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationOptions {
    pub title: String,
    pub body: String,
    pub icon: String,
    /// Application data carried alongside the notification.
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Scope of a view enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewQuery {
    /// Only top-level windows, not embedded or worker clients.
    pub windows_only: bool,
    /// Include views this process does not control (e.g. opened before it started).
    pub include_uncontrolled: bool,
}

impl ViewQuery {
    /// Every window the application has open, controlled or not.
    pub fn all_windows() -> Self {
        Self {
            windows_only: true,
            include_uncontrolled: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("view {0} is no longer open")]
    ViewClosed(String),

    #[error("platform capability failed: {0}")]
    Capability(String),
}

/// Runtime capabilities provided by the host.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Currently open views. Must reflect the state at call time.
    async fn enumerate_views(&self, query: ViewQuery) -> Result<Vec<ViewHandle>, PlatformError>;

    async fn focus(&self, view: &ViewHandle) -> Result<(), PlatformError>;

    /// Whether [`Platform::open_new`] is supported on this host.
    fn can_open_views(&self) -> bool;

    /// Open a new view at `url`. Some hosts cannot report the new view back.
    async fn open_new(&self, url: &str) -> Result<Option<ViewHandle>, PlatformError>;

    async fn dismiss(&self, notification: &NotificationRef) -> Result<(), PlatformError>;

    /// Render a system notification; resolves once it is visible.
    async fn display(&self, options: NotificationOptions) -> Result<NotificationRef, PlatformError>;
}
