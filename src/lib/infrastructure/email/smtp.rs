//! SMTP email service implementation

use clap::Parser;
use lettre::{
    address::Envelope,
    transport::smtp::{
        self,
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    SmtpTransport, Transport,
};
use tracing::debug;

use crate::domain::communication::mailer::{Mailer, MailerError};

/// SMTP configuration
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[arg(long = "smtp-host", env = "SMTP_HOST", default_value = "localhost")]
    pub host: String,

    /// The SMTP port
    #[arg(long = "smtp-port", env = "SMTP_PORT", default_value = "25")]
    pub port: u16,

    /// The SMTP username
    #[arg(long = "smtp-user", env = "SMTP_USER")]
    pub username: Option<String>,

    /// The SMTP password
    #[arg(long = "smtp-password", env = "SMTP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Require a STARTTLS upgrade before sending
    #[arg(long = "smtp-starttls", env = "SMTP_STARTTLS")]
    pub starttls: bool,

    /// Accept invalid TLS certificates
    #[arg(long = "smtp-accept-invalid-certs", env = "SMTP_ACCEPT_INVALID_CERTS")]
    pub accept_invalid_certs: bool,
}

impl Default for SMTPConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 25,
            username: None,
            password: None,
            starttls: false,
            accept_invalid_certs: false,
        }
    }
}

impl SMTPConfig {
    /// Credentials to log in with, when both a username and a password are set
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                Some(Credentials::new(username.clone(), password.clone()))
            }
            _ => None,
        }
    }
}

/// SMTP mailer
#[derive(Debug, Default, Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SMTPConfig) -> Self {
        Self { config }
    }

    /// Build a single-use transport for the configured relay
    pub fn mailer(&self) -> Result<SmtpTransport, MailerError> {
        let mut relay = SmtpTransport::builder_dangerous(self.config.host.as_str())
            .port(self.config.port);

        if self.config.starttls {
            let parameters = TlsParameters::builder(self.config.host.clone())
                .dangerous_accept_invalid_certs(self.config.accept_invalid_certs)
                .build()
                .map_err(|e| MailerError::UnknownError(e.into()))?;

            relay = relay.tls(Tls::Required(parameters));
        }

        if let Some(credentials) = self.config.credentials() {
            relay = relay.credentials(credentials);
        }

        Ok(relay.build())
    }
}

impl Mailer for SMTPMailer {
    fn send(&self, envelope: &Envelope, email: &[u8]) -> Result<(), MailerError> {
        debug!(
            host = %self.config.host,
            port = self.config.port,
            "submitting {} bytes",
            email.len()
        );

        match self.mailer()?.send_raw(envelope, email) {
            Ok(_) => Ok(()),
            Err(e) => Err(classify(e)),
        }
    }
}

fn classify(err: smtp::Error) -> MailerError {
    if err.is_transient() || err.is_permanent() {
        MailerError::Rejected(err.into())
    } else {
        MailerError::ConnectionFailed(err.into())
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_defaults_point_at_local_relay() -> TestResult {
        let config = SMTPConfig::try_parse_from(["smtp"])?;

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 25);
        assert!(!config.starttls);
        assert!(config.credentials().is_none());

        Ok(())
    }

    #[test]
    fn test_credentials_need_user_and_password() -> TestResult {
        let only_user = SMTPConfig::try_parse_from(["smtp", "--smtp-user", "alice"])?;
        assert!(only_user.credentials().is_none());

        let both = SMTPConfig::try_parse_from([
            "smtp",
            "--smtp-user",
            "alice",
            "--smtp-password",
            "hunter2",
        ])?;
        assert!(both.credentials().is_some());

        Ok(())
    }

    #[test]
    fn test_builds_transport_with_starttls() -> TestResult {
        let mailer = SMTPMailer::new(SMTPConfig {
            host: "mail.example.com".to_string(),
            port: 587,
            starttls: true,
            ..SMTPConfig::default()
        });

        mailer.mailer()?;

        Ok(())
    }

    #[test]
    fn test_unreachable_relay_is_a_connection_failure() -> TestResult {
        // bind then drop to get a port nobody listens on
        let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();

        let mailer = SMTPMailer::new(SMTPConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..SMTPConfig::default()
        });

        let envelope = Envelope::new(
            Some("from@example.com".parse()?),
            vec!["to@example.com".parse()?],
        )?;

        let result = mailer.send(&envelope, b"Subject: hi\r\n\r\nhello\r\n");

        assert!(matches!(result, Err(MailerError::ConnectionFailed(_))));

        Ok(())
    }
}
