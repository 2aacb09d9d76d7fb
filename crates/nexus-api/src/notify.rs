//! Fire-and-forget notification dispatch.
//!
//! The triggering operation has already committed by the time a notification
//! is dispatched; delivery runs on a detached task and never blocks or fails
//! the caller. Failures are logged and dropped.

use std::sync::Arc;

use tracing::warn;

use nexus_mailer::{Notification, Notifier};

/// Spawn delivery of a notification off the request path.
pub fn dispatch(notifier: Arc<dyn Notifier>, note: Notification) {
    tokio::spawn(async move {
        if let Err(e) = notifier.deliver(&note).await {
            warn!(
                kind = note.kind(),
                recipient = note.recipient(),
                error = %e,
                "notification delivery failed"
            );
        }
    });
}
