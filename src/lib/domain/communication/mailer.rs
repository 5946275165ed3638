//! Mail transmission seam

mod errors;
mod message;

use lettre::address::Envelope;

pub use errors::MailerError;
pub use message::Message;

/// Submits an already serialized message to a mail relay
pub trait Mailer: Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `envelope` - The SMTP envelope: one sender and one recipient.
    /// * `email` - The fully serialized message, headers and body.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] once the relay has accepted the message.
    fn send(&self, envelope: &Envelope, email: &[u8]) -> Result<(), MailerError>;
}
