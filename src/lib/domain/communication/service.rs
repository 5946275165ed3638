//! Email service

use std::sync::Arc;

use tracing::info;

use super::{
    composer::MessageComposer,
    errors::EmailError,
    mailer::{Mailer, Message},
    rendering::Renderer,
};

/// Email service
pub trait EmailService: Send + Sync + 'static {
    /// Builds the email for `message` and hands it to the relay.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] once the relay has accepted the message.
    /// If composing fails nothing is sent.
    fn send_email(&self, message: &Message) -> Result<(), EmailError>;
}

/// Email service implementation
#[derive(Debug, Clone)]
pub struct EmailServiceImpl<R, M>
where
    R: Renderer,
    M: Mailer,
{
    composer: MessageComposer<R>,
    mailer: Arc<M>,
}

impl<R, M> EmailServiceImpl<R, M>
where
    R: Renderer,
    M: Mailer,
{
    /// Creates a new email service.
    pub fn new(composer: MessageComposer<R>, mailer: Arc<M>) -> Self {
        Self { composer, mailer }
    }
}

impl<R, M> EmailService for EmailServiceImpl<R, M>
where
    R: Renderer,
    M: Mailer,
{
    fn send_email(&self, message: &Message) -> Result<(), EmailError> {
        let email = self.composer.compose(message)?;

        self.mailer.send(email.envelope(), &email.formatted())?;

        info!(
            from = %message.from,
            to = %message.to,
            images = message.images.len(),
            "message accepted by relay"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use anyhow::anyhow;
    use testresult::TestResult;

    use crate::domain::communication::{
        composer::ComposeError,
        email_addresses::EmailAddress,
        mailer::{tests::MockMailer, MailerError},
        rendering::LineBreakRenderer,
    };

    use super::*;

    fn message(images: Vec<String>) -> TestResult<Message> {
        Ok(Message {
            to: EmailAddress::new("to@example.com")?,
            from: EmailAddress::new("from@example.com")?,
            subject: "Weekly numbers".to_string(),
            plain_body: "All good".to_string(),
            images,
            date: SystemTime::now(),
        })
    }

    #[test]
    fn test_send_email_success() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send()
            .times(1)
            .withf(|envelope, email| {
                let raw = String::from_utf8_lossy(email);

                envelope.from().map(|a| a.to_string()) == Some("from@example.com".to_string())
                    && envelope.to().iter().map(|a| a.to_string()).eq(["to@example.com"])
                    && raw.contains("Subject: Weekly numbers")
                    && raw.contains("All good")
            })
            .returning(|_, _| Ok(()));

        let service =
            EmailServiceImpl::new(MessageComposer::new(LineBreakRenderer), Arc::new(mailer));

        service.send_email(&message(vec![])?)?;

        Ok(())
    }

    #[test]
    fn test_send_email_failure() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send()
            .times(1)
            .returning(|_, _| Err(MailerError::Rejected(anyhow!("550 no such user"))));

        let service =
            EmailServiceImpl::new(MessageComposer::new(LineBreakRenderer), Arc::new(mailer));

        let result = service.send_email(&message(vec![])?);

        assert!(matches!(
            result,
            Err(EmailError::Send(MailerError::Rejected(_)))
        ));

        Ok(())
    }

    #[test]
    fn test_unreadable_image_is_never_sent() -> TestResult {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("gone.png").to_string_lossy().into_owned();

        let mut mailer = MockMailer::new();
        mailer.expect_send().never();

        let service =
            EmailServiceImpl::new(MessageComposer::new(LineBreakRenderer), Arc::new(mailer));

        let result = service.send_email(&message(vec![missing])?);

        assert!(matches!(
            result,
            Err(EmailError::Compose(ComposeError::ImageUnreadable { .. }))
        ));

        Ok(())
    }
}
