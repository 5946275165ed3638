#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Send one Markdown email with inline images through an SMTP relay

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mdmail::{
    domain::communication::{
        composer::MessageComposer,
        rendering::renderer_for,
        service::{EmailService, EmailServiceImpl},
    },
    infrastructure::{
        cli::{local_hostname, Args},
        email::smtp::SMTPMailer,
    },
};

#[mutants::skip]
fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let message = args.message(&local_hostname()?)?;

    let service = EmailServiceImpl::new(
        MessageComposer::new(renderer_for(!args.no_markdown)),
        Arc::new(SMTPMailer::new(args.smtp)),
    );

    service.send_email(&message)?;

    Ok(())
}
