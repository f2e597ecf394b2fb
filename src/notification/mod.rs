//! Push notification handling subsystem.
//!
//! # Data Flow
//! ```text
//! push message (app in background)
//!     → worker.rs (decode, spawn per event)
//!     → receiver.rs (title/body/icon)
//!     → Platform::display
//!
//! notification click
//!     → worker.rs (spawn per event)
//!     → click.rs: dismiss → enumerate views → focus match | open target | nothing
//! ```
//!
//! # Design Decisions
//! - Platform capabilities are injected (`Arc<dyn Platform>`), never global
//! - No state survives an invocation; views are enumerated per click
//! - The deep-link target lives on the app origin, not the relay origin

pub mod click;
pub mod payload;
pub mod platform;
pub mod receiver;
pub mod worker;

pub use click::{ClickError, ClickEvent, ClickOutcome, ClickRouter};
pub use payload::{NotificationContent, PushError, PushPayload};
pub use platform::{NotificationOptions, NotificationRef, Platform, PlatformError, ViewHandle, ViewQuery};
pub use receiver::PushReceiver;
pub use worker::{NotificationWorker, WorkerEvent, WorkerHandle, WorkerOutcome};
