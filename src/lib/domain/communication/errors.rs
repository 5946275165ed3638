//! Error types for the email module

use thiserror::Error;

use super::{composer::ComposeError, mailer::MailerError};

/// Email errors
#[derive(Debug, Error)]
pub enum EmailError {
    /// The message could not be built; nothing was sent
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// The message was built but the relay did not accept it
    #[error(transparent)]
    Send(#[from] MailerError),
}
