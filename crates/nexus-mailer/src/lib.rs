//! Transactional email notifications.
//!
//! Lifecycle events produce a `Notification`; a `Notifier` renders and hands
//! it to an outbound SMTP transport. Delivery is best-effort: the dispatch
//! site spawns it off the request path and only logs failures.

pub mod error;
pub mod template;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use nexus_models::{ApplicationStatus, JobId};

pub use error::{MailerError, MailerResult};
pub use template::{render, status_message, Rendered};

/// A lifecycle event to be delivered by email.
#[derive(Debug, Clone)]
pub enum Notification {
    /// Confirmation to the applicant after a successful apply.
    ApplicationSubmitted {
        to: String,
        applicant_name: String,
        job_id: JobId,
        job_title: String,
        company: String,
    },
    /// Heads-up to the employer that someone applied.
    ApplicationReceived {
        to: String,
        employer_name: String,
        job_id: JobId,
        job_title: String,
        applicant_name: String,
        applicant_email: String,
    },
    /// Status-transition notice to the applicant.
    StatusChanged {
        to: String,
        applicant_name: String,
        job_id: JobId,
        job_title: String,
        company: String,
        status: ApplicationStatus,
    },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::ApplicationSubmitted { .. } => "application-confirmation",
            Notification::ApplicationReceived { .. } => "application-notification",
            Notification::StatusChanged { .. } => "status-update",
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            Notification::ApplicationSubmitted { to, .. } => to,
            Notification::ApplicationReceived { to, .. } => to,
            Notification::StatusChanged { to, .. } => to,
        }
    }
}

/// Outbound delivery seam. Production uses SMTP; tests substitute a recorder.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, note: &Notification) -> MailerResult<()>;
}

/// SMTP transport configuration.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub smtp_host: String,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from_name: String,
    pub from_email: String,
    /// Front-end base URL used to build deep links in email bodies.
    pub client_url: String,
}

impl MailerConfig {
    /// Load from environment variables with development defaults.
    pub fn from_env() -> Self {
        Self {
            smtp_host: std::env::var("EMAIL_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_user: std::env::var("EMAIL_USER").unwrap_or_default(),
            smtp_pass: std::env::var("EMAIL_PASSWORD").unwrap_or_default(),
            from_name: std::env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| "Nexus".to_string()),
            from_email: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "noreply@nexus.example".to_string()),
            client_url: std::env::var("CLIENT_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}

/// SMTP-backed notifier.
///
/// lettre's SMTP transport is blocking, so the send runs on the blocking
/// thread pool.
pub struct SmtpMailer {
    config: MailerConfig,
}

impl SmtpMailer {
    pub fn new(config: MailerConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(MailerConfig::from_env())
    }

    fn send_blocking(config: &MailerConfig, rendered: &Rendered) -> MailerResult<()> {
        let email = Message::builder()
            .from(format!("{} <{}>", config.from_name, config.from_email).parse()?)
            .to(rendered.to.parse()?)
            .subject(rendered.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(rendered.body.clone())?;

        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());
        let mailer = SmtpTransport::relay(&config.smtp_host)?
            .credentials(creds)
            .build();

        mailer.send(&email)?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpMailer {
    async fn deliver(&self, note: &Notification) -> MailerResult<()> {
        let rendered = render(note, &self.config.client_url);
        let config = self.config.clone();
        let kind = note.kind();

        tokio::task::spawn_blocking(move || Self::send_blocking(&config, &rendered)).await??;
        info!(kind, "notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_kinds() {
        let note = Notification::StatusChanged {
            to: "a@b.co".to_string(),
            applicant_name: "A".to_string(),
            job_id: JobId::from("j"),
            job_title: "T".to_string(),
            company: "C".to_string(),
            status: ApplicationStatus::Offered,
        };
        assert_eq!(note.kind(), "status-update");
        assert_eq!(note.recipient(), "a@b.co");
    }
}
