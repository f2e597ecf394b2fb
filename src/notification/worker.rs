//! Handler registration and event dispatch.
//!
//! The host registers once at startup, then hands every push and click to
//! [`WorkerHandle::dispatch`] (or feeds them through [`WorkerHandle::run`]).
//! The gateway binary does not register a worker; hosts embedding the library do.
//! Each event runs as its own task; nothing is shared between invocations
//! beyond the platform handle.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{broadcast, mpsc};
use tokio::task::{JoinError, JoinHandle, JoinSet};

use crate::config::NotificationConfig;
use crate::notification::click::{ClickEvent, ClickOutcome, ClickRouter};
use crate::notification::payload::PushPayload;
use crate::notification::platform::{NotificationRef, Platform};
use crate::notification::receiver::PushReceiver;

/// Events the platform delivers to the worker.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// Raw push message, decoded by the worker.
    Push(Value),
    Click(ClickEvent),
}

/// Terminal state of one event. Every dispatched event resolves to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    Displayed(NotificationRef),
    Routed(ClickOutcome),
    /// The event could not be handled; the reason has been logged.
    Dropped(String),
}

pub struct NotificationWorker;

impl NotificationWorker {
    /// Build both handlers against `platform`.
    pub fn register(
        platform: Arc<dyn Platform>,
        config: &NotificationConfig,
    ) -> Result<WorkerHandle, url::ParseError> {
        let target = config.deep_link_target()?;
        tracing::info!(target = %target, icon = %config.icon, "Notification handlers registered");

        Ok(WorkerHandle {
            receiver: Arc::new(PushReceiver::new(platform.clone(), config.icon.clone())),
            router: Arc::new(ClickRouter::new(platform, target)),
        })
    }
}

#[derive(Clone)]
pub struct WorkerHandle {
    receiver: Arc<PushReceiver>,
    router: Arc<ClickRouter>,
}

impl WorkerHandle {
    /// Handle one event on its own task. The returned handle is the
    /// completion the platform waits on.
    pub fn dispatch(&self, event: WorkerEvent) -> JoinHandle<WorkerOutcome> {
        tokio::spawn(self.clone().handle(event))
    }

    async fn handle(self, event: WorkerEvent) -> WorkerOutcome {
        match event {
            WorkerEvent::Push(raw) => {
                let result = match PushPayload::from_value(raw) {
                    Ok(payload) => self.receiver.handle(payload).await,
                    Err(e) => {
                        tracing::warn!(error = %e, "Dropping push message");
                        Err(e)
                    }
                };
                match result {
                    Ok(notification) => WorkerOutcome::Displayed(notification),
                    Err(e) => WorkerOutcome::Dropped(e.to_string()),
                }
            }
            WorkerEvent::Click(click) => match self.router.handle(click).await {
                Ok(outcome) => WorkerOutcome::Routed(outcome),
                Err(e) => {
                    tracing::error!(error = %e, "Notification click failed");
                    WorkerOutcome::Dropped(e.to_string())
                }
            },
        }
    }

    /// Consume events until the channel closes or shutdown fires.
    ///
    /// Events already queued when shutdown fires are still handled, and every
    /// spawned invocation is awaited before returning. Returns the outcome of
    /// each accepted event in completion order.
    pub async fn run(
        self,
        mut events: mpsc::Receiver<WorkerEvent>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Vec<WorkerOutcome> {
        let mut tasks: JoinSet<WorkerOutcome> = JoinSet::new();
        let mut outcomes = Vec::new();

        loop {
            tokio::select! {
                biased;
                event = events.recv() => match event {
                    Some(event) => {
                        tasks.spawn(self.clone().handle(event));
                    }
                    None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    collect(&mut outcomes, joined);
                }
                _ = shutdown.recv() => {
                    tracing::info!("Notification worker received shutdown signal");
                    events.close();
                    while let Some(event) = events.recv().await {
                        tasks.spawn(self.clone().handle(event));
                    }
                    break;
                }
            }
        }

        if !tasks.is_empty() {
            tracing::info!(in_flight = tasks.len(), "Waiting for notification events to complete");
        }
        while let Some(joined) = tasks.join_next().await {
            collect(&mut outcomes, joined);
        }

        tracing::info!(handled = outcomes.len(), "Notification worker stopped");
        outcomes
    }

    pub fn deep_link_target(&self) -> &str {
        self.router.target()
    }
}

fn collect(outcomes: &mut Vec<WorkerOutcome>, joined: Result<WorkerOutcome, JoinError>) {
    match joined {
        Ok(outcome) => outcomes.push(outcome),
        Err(e) => {
            tracing::error!(error = %e, "Notification task failed");
            outcomes.push(WorkerOutcome::Dropped(e.to_string()));
        }
    }
}
