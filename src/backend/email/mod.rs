//! Email Module
//!
//! Sends the account confirmation email after registration. Delivery uses
//! SMTP through lettre; bodies are rendered from askama templates under
//! `templates/email/`, as a text and an HTML alternative.
//!
//! When SMTP is not configured the server runs without a `Mailer` and the
//! registration handler logs the confirmation link instead.

use askama::Template;
use lettre::{
    message::{header::ContentType, MultiPart, SinglePart},
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::shared::config::SmtpSettings;

const VERIFICATION_SUBJECT: &str = "Account verification";

/// HTML body of the verification email
#[derive(Template)]
#[template(path = "email/verification.html")]
struct VerificationEmailHtml<'a> {
    username: &'a str,
    link: &'a str,
}

/// Plain text body of the verification email
#[derive(Template)]
#[template(path = "email/verification.txt")]
struct VerificationEmailText<'a> {
    username: &'a str,
    link: &'a str,
}

/// Errors that can occur when sending email
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Link embedded in the verification email
pub fn verification_link(public_base_url: &str, token: &str) -> String {
    format!("{}/verification?token={}", public_base_url, token)
}

/// SMTP mailer for transactional email
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl Mailer {
    /// Create a mailer from SMTP settings
    ///
    /// No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns error if the relay host is invalid.
    pub fn new(settings: &SmtpSettings) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(settings.username.clone(), settings.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_address: settings.from_address.clone(),
        })
    }

    /// Send the account confirmation email
    ///
    /// # Arguments
    /// * `to` - Recipient address
    /// * `username` - Used in the greeting
    /// * `link` - Full confirmation URL
    pub async fn send_verification(
        &self,
        to: &str,
        username: &str,
        link: &str,
    ) -> Result<(), EmailError> {
        let (text, html) = render_verification(username, link)?;
        self.send_multipart_email(to, VERIFICATION_SUBJECT, &text, &html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.transport.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}

/// Render the text and HTML bodies of the verification email
fn render_verification(username: &str, link: &str) -> Result<(String, String), askama::Error> {
    let text = VerificationEmailText { username, link }.render()?;
    let html = VerificationEmailHtml { username, link }.render()?;
    Ok((text, html))
}
