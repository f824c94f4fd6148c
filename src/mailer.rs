use async_trait::async_trait;

use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> AppResult<()>;
}

/// Writes outgoing mail to the log instead of delivering it.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> AppResult<()> {
        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            bytes = email.html.len(),
            "mail dispatched"
        );
        tracing::debug!(body = %email.html, "mail body");
        Ok(())
    }
}

pub fn verification_link(base_url: &str, token: &str) -> String {
    format!("{}/verified/{}", base_url.trim_end_matches('/'), token)
}

pub fn verification_email_body(link: &str) -> String {
    format!(
        r#"<div style="font-family: sans-serif">
  <h2>Verify your email</h2>
  <p>Your account has been created. Open the link below to verify your email address.</p>
  <p><a href="{link}">{link}</a></p>
  <p>An administrator still has to activate the account before you can sign in.</p>
</div>"#
    )
}
