//! Mailer error types.

use thiserror::Error;

/// Result type for mailer operations.
pub type MailerResult<T> = Result<T, MailerError>;

/// Errors that can occur while rendering or delivering a notification.
///
/// These are always caught and logged at the dispatch site; they never
/// propagate into the triggering request.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Delivery task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
