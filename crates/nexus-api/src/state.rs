//! Application state.

use std::sync::Arc;

use nexus_mailer::{Notifier, SmtpMailer};
use nexus_store::{JobStore, MemoryStore, UserStore};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Both repositories are held behind their trait objects; the bundled
/// backend is `MemoryStore`, and a real document database slots in at the
/// same seam.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub users: Arc<dyn UserStore>,
    pub jobs: Arc<dyn JobStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create new application state with the default store and SMTP mailer.
    pub fn new(config: ApiConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            config,
            users: store.clone(),
            jobs: store,
            notifier: Arc::new(SmtpMailer::from_env()),
        }
    }
}
