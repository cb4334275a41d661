//! HTTP proxy endpoints for the LINE and Telegram APIs.
//!
//! Each forwarding route relays the caller's JSON body to one upstream
//! endpoint with the server-side credential attached, then relays the
//! upstream status and JSON unchanged. Webhook routes always answer 200.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use taskdesk_core::{
    Journal, LineClient, Notification, NotificationCollection, NotificationKind, TelegramClient,
};

pub use error::ProxyError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub line: LineClient,
    pub telegram: TelegramClient,
    /// Webhook receivers record incoming messages here.
    pub inbox: Arc<Mutex<Inbox>>,
}

impl AppState {
    pub fn new(line: LineClient, telegram: TelegramClient, journal: Journal) -> Self {
        Self {
            line,
            telegram,
            inbox: Arc::new(Mutex::new(Inbox::new(journal))),
        }
    }
}

/// In-memory owner of the notification collection the journal reports into.
pub struct Inbox {
    journal: Journal,
    collection: NotificationCollection,
}

impl Inbox {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            collection: NotificationCollection::default(),
        }
    }

    /// Add a system notification and fold it into the collection.
    pub fn record(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        related_id: Option<String>,
    ) -> Notification {
        let notification = self.journal.add_system_entry(message, Some(kind), related_id);
        for event in self.journal.drain_events() {
            self.collection.apply(&event);
        }
        self.journal.sync_collection(&self.collection);
        notification
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        let changed = self.collection.mark_read(id);
        self.journal.sync_collection(&self.collection);
        changed
    }

    /// Everything visible to `user_id`, or the whole collection.
    pub fn list(&self, user_id: Option<&str>) -> Vec<Notification> {
        let mirror = self.journal.notifications();
        match user_id {
            Some(user) => mirror.for_user(user).cloned().collect(),
            None => mirror.items().to_vec(),
        }
    }

    pub fn unread_count(&self) -> usize {
        self.journal.notifications().unread_count()
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::line::router())
        .merge(routes::telegram::router())
        .merge(routes::notifications::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
