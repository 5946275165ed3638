//! Building and sending a single email

pub mod composer;
pub mod email_addresses;
pub mod errors;
pub mod mailer;
pub mod rendering;
pub mod service;
