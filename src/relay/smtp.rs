//! Alternate delivery backend relaying submissions through an SMTP server

use anyhow::Context;
use async_trait::async_trait;
use formrelay_contact::Submission;
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{info, warn};

use super::{Delivery, UpstreamReply};
use crate::config::SmtpConfig;
use crate::error::RelayError;

pub struct Smtp {
    mailer: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
    subject: String,
}

impl Smtp {
    /// `Ok(None)` when host or recipient is missing.
    pub fn from_config(config: &SmtpConfig) -> anyhow::Result<Option<Self>> {
        let (Some(host), Some(to)) = (config.host(), config.to()) else {
            return Ok(None);
        };

        let mailer = if config.username.is_empty() || config.password.is_empty() {
            info!(
                smtp_host = %host,
                smtp_port = config.port,
                "SMTP credentials not configured, using unauthenticated connection"
            );
            SmtpTransport::builder_dangerous(host)
                .port(config.port)
                .build()
        } else {
            let creds = Credentials::new(config.username.clone(), config.password.clone());
            let builder = if config.tls {
                SmtpTransport::starttls_relay(host)?
            } else {
                SmtpTransport::builder_dangerous(host)
            };
            info!(
                smtp_host = %host,
                smtp_port = config.port,
                tls = config.tls,
                "SMTP delivery initialized with authentication"
            );
            builder.port(config.port).credentials(creds).build()
        };

        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email)
            .parse()
            .context("Failed to parse smtp.from_email")?;
        let to: Mailbox = to.parse().context("Failed to parse smtp.to")?;

        Ok(Some(Self {
            mailer,
            from,
            to,
            subject: config.subject.clone(),
        }))
    }

    fn build_message(&self, submission: &Submission) -> anyhow::Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(&self.subject)
            .header(ContentType::TEXT_PLAIN);

        match submission.email.parse() {
            Ok(address) => {
                builder = builder.reply_to(Mailbox::new(Some(submission.name.clone()), address));
            }
            Err(e) => {
                warn!(error = %e, "Submitter address is not a valid mailbox, skipping Reply-To");
            }
        }

        builder
            .body(render_body(submission))
            .context("Failed to build submission email")
    }
}

fn render_body(submission: &Submission) -> String {
    format!(
        "New Contact Form Submission\n\
         ============================\n\n\
         Name: {}\n\
         Email: {}\n\
         Company: {}\n\
         Phone: {}\n\
         Inquiry: {}\n\n\
         Message:\n\
         {}\n",
        submission.name,
        submission.email,
        submission.company,
        submission.phone,
        submission.inquiry,
        submission.message
    )
}

#[async_trait]
impl Delivery for Smtp {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn deliver(&self, submission: &Submission) -> Result<UpstreamReply, RelayError> {
        let message = self.build_message(submission)?;
        let mailer = self.mailer.clone();

        tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .context("SMTP send task failed")?
            .map_err(|e| RelayError::UpstreamUnavailable(e.to_string()))?;

        Ok(UpstreamReply::delivered("Email sent successfully"))
    }
}
