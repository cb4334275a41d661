//! # taskdesk Core Library
//!
//! Business logic shared by the `taskdesk-cli` binary and the
//! `taskdesk-proxy` HTTP server. Persistence, authentication and row-level
//! security live in the hosted backend; this crate covers what runs locally.
//!
//! ## Architecture
//!
//! - **Journal**: newest-first task log plus a mirror of the caller-owned
//!   notification collection, reporting its insertions as events
//! - **Reporting**: status normalisation and per-department tallies
//! - **Integrations**: single-call forwarders for the LINE and Telegram APIs
//! - **Storage**: TOML configuration and the CLI's JSON journal snapshot
//!
//! ## Key Components
//!
//! - [`Journal`]: task log + notification mirror façade
//! - [`NotificationCollection`]: owner-side list the journal reports into
//! - [`Config`]: application configuration management
//! - [`MessagingService`]: trait implemented by the forwarders

pub mod clock;
pub mod error;
pub mod events;
pub mod ids;
pub mod integrations;
pub mod journal;
pub mod report;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, ForwardError, ValidationError};
pub use events::JournalEvent;
pub use ids::{IdGenerator, IdStrategy};
pub use integrations::{ForwardResponse, LineClient, MessagingService, TelegramClient};
pub use journal::{
    Journal, JournalOptions, Notification, NotificationCollection, NotificationKind, TaskLog,
};
pub use report::{DepartmentSummary, TaskRecord, TaskStatus};
pub use storage::{Config, JournalSnapshot};
