//! Push payload as delivered by the messaging service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a push could not be turned into a notification.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("malformed push payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Platform(#[from] crate::notification::platform::PlatformError),
}

/// `{notification: {title, body}, data?: {...}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub notification: Option<NotificationContent>,

    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationContent {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub body: Option<String>,
}

impl PushPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notification: Some(NotificationContent {
                title: Some(title.into()),
                body: Some(body.into()),
            }),
            data: Map::new(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Decode a raw push message.
    pub fn from_value(raw: Value) -> Result<Self, PushError> {
        serde_json::from_value(raw).map_err(|e| PushError::MalformedPayload(e.to_string()))
    }

    /// Title and body, or the first missing field.
    pub fn title_and_body(&self) -> Result<(&str, &str), PushError> {
        let content = self
            .notification
            .as_ref()
            .ok_or_else(|| PushError::MalformedPayload("missing notification".into()))?;
        let title = content
            .title
            .as_deref()
            .ok_or_else(|| PushError::MalformedPayload("missing notification.title".into()))?;
        let body = content
            .body
            .as_deref()
            .ok_or_else(|| PushError::MalformedPayload("missing notification.body".into()))?;
        Ok((title, body))
    }
}
