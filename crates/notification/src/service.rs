//! Email delivery service using lettre

use lettre::{
    Message, SmtpTransport, Transport, message::header,
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    pub contact_address: String,
}

/// A plain text message ready to be handed to a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub recipients: Vec<String>,
    pub reply_to: String,
    pub body: String,
}

/// Delivers an [`OutgoingEmail`]. Any transport fault is returned as an error.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()>;
}

/// SMTP backed [`Mailer`]
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: String,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );

            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.from_address,
                "Email service initialized with authentication and TLS"
            );

            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            from: config.from_address.clone(),
        })
    }

    pub fn build_message(&self, email: &OutgoingEmail) -> anyhow::Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.parse()?)
            .reply_to(email.reply_to.parse()?)
            .subject(email.subject.as_str())
            .header(header::ContentType::TEXT_PLAIN);

        for recipient in &email.recipients {
            builder = builder.to(recipient.parse()?);
        }

        Ok(builder.body(email.body.clone())?)
    }
}

#[async_trait::async_trait]
impl Mailer for EmailService {
    #[tracing::instrument(skip_all, fields(subject = %email.subject))]
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()> {
        let message = self.build_message(&email)?;
        let mailer = self.mailer.clone();

        tracing::info!(recipients = email.recipients.len(), "Sending email text plain");

        tokio::task::spawn_blocking(move || mailer.send(&message)).await??;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            smtp_host: "localhost".to_owned(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "Portfolio <noreply@portfolio.localhost>".to_owned(),
            contact_address: "owner@portfolio.localhost".to_owned(),
        }
    }

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            subject: "Portfolio Contact: Hi".to_owned(),
            recipients: vec!["owner@portfolio.localhost".to_owned()],
            reply_to: "jo@x.com".to_owned(),
            body: "Hello".to_owned(),
        }
    }

    #[test]
    fn test_build_message_headers() -> anyhow::Result<()> {
        let service = EmailService::new(&config())?;
        let message = service.build_message(&email())?;
        let formatted = String::from_utf8(message.formatted())?;

        assert!(formatted.contains("From: Portfolio <noreply@portfolio.localhost>"));
        assert!(formatted.contains("Reply-To: jo@x.com"));
        assert!(formatted.contains("To: owner@portfolio.localhost"));
        assert!(formatted.contains("Subject: Portfolio Contact: Hi"));
        assert!(formatted.contains("Content-Type: text/plain"));

        Ok(())
    }

    #[test]
    fn test_build_message_rejects_malformed_reply_to() -> anyhow::Result<()> {
        let service = EmailService::new(&config())?;
        let mut email = email();
        email.reply_to = "not an address".to_owned();

        assert!(service.build_message(&email).is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_send_fails_without_server() -> anyhow::Result<()> {
        let mut config = config();
        config.smtp_port = 9;
        let service = EmailService::new(&config)?;

        assert!(service.send(email()).await.is_err());

        Ok(())
    }
}
