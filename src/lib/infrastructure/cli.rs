//! Command-line arguments / environment variables

use std::{
    convert::Infallible,
    fs, io,
    path::PathBuf,
    str::FromStr,
    time::SystemTime,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    domain::communication::{email_addresses::EmailAddress, mailer::Message},
    infrastructure::email::smtp::SMTPConfig,
};

/// Send an email rendered from Markdown, with images embedded inline
#[derive(Debug, Parser)]
#[command(name = "mdmail", version)]
pub struct Args {
    /// Subject
    #[arg(short = 's', long, default_value = "")]
    pub subject: String,

    /// Sender address (default: $USER)
    #[arg(short = 'f', long = "from-addr", env = "USER", hide_env_values = true)]
    pub from_addr: String,

    /// Recipient address (default: $USER)
    #[arg(short = 't', long = "to-addr", env = "USER", hide_env_values = true)]
    pub to_addr: String,

    /// Path to file containing email body, or `-` for standard input
    #[arg(short = 'b', long)]
    pub body: BodySource,

    /// Path to image to include (use multiple times)
    #[arg(short = 'i', long = "image")]
    pub images: Vec<String>,

    /// Only turn newlines into line breaks instead of rendering Markdown
    #[arg(long)]
    pub no_markdown: bool,

    /// The SMTP relay configuration
    #[command(flatten)]
    pub smtp: SMTPConfig,
}

impl Args {
    /// Build the message draft.
    ///
    /// Bare login names are qualified with `host`. The body is read here, so
    /// a missing body file fails before any image is touched.
    pub fn message(&self, host: &str) -> Result<Message> {
        let from = EmailAddress::from_identity(&self.from_addr, host)
            .with_context(|| format!("bad sender address {:?}", self.from_addr))?;
        let to = EmailAddress::from_identity(&self.to_addr, host)
            .with_context(|| format!("bad recipient address {:?}", self.to_addr))?;

        let plain_body = self.body.read()?;

        Ok(Message {
            to,
            from,
            subject: self.subject.clone(),
            plain_body,
            images: self.images.clone(),
            date: SystemTime::now(),
        })
    }
}

/// Where the body text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    /// Read standard input to the end
    Stdin,

    /// Read a file
    File(PathBuf),
}

impl BodySource {
    /// Read the whole body
    pub fn read(&self) -> Result<String> {
        match self {
            Self::Stdin => {
                io::read_to_string(io::stdin().lock()).context("failed to read body from stdin")
            }
            Self::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read body from {}", path.display())),
        }
    }
}

impl FromStr for BodySource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-" => Self::Stdin,
            path => Self::File(PathBuf::from(path)),
        })
    }
}

/// The name of this machine, used to qualify bare login names
pub fn local_hostname() -> Result<String> {
    let host = hostname::get().context("could not determine the local host name")?;

    Ok(host.to_string_lossy().into_owned())
}
