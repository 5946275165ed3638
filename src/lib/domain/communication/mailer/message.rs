//! Email message

use std::time::SystemTime;

use crate::domain::communication::email_addresses::EmailAddress;

/// Everything needed to build one email.
///
/// The HTML alternative is never supplied directly; it is always derived
/// from `plain_body` when the message is composed.
#[derive(Debug, Clone)]
pub struct Message {
    /// The recipient of the email
    pub to: EmailAddress,

    /// The sender of the email
    pub from: EmailAddress,

    /// The subject of the email
    pub subject: String,

    /// The plain text body of the email, possibly empty
    pub plain_body: String,

    /// Paths of the images to embed, in display order.
    ///
    /// Each path string doubles as the image's content identifier.
    pub images: Vec<String>,

    /// Value of the `Date` header
    pub date: SystemTime,
}
