//! Mailer errors

use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The relay could not be reached, or the connection failed mid-session
    #[error("could not talk to the SMTP relay")]
    ConnectionFailed(#[source] anyhow::Error),

    /// The relay answered with a negative reply
    #[error("the SMTP relay rejected the message")]
    Rejected(#[source] anyhow::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}
