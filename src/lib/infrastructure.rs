//! Adapters to the outside world: the SMTP relay and the command line

pub mod cli;
pub mod email;
