//! Report mailer: delivers the email body with the PDF attached.
//!
//! `HttpMailer` talks to a Resend-compatible HTTP API. Retries on 429 and 5xx
//! with exponential backoff; any other failure fails the request.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// File name of the PDF attachment.
pub const REPORT_ATTACHMENT_NAME: &str = "numerology-report.pdf";

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Mail API unavailable after {retries} retries")]
    RetriesExhausted { retries: u32 },

    #[error("Recipient address is empty")]
    EmptyRecipient,
}

/// A rendered report ready for delivery.
#[derive(Debug, Clone)]
pub struct ReportEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub pdf: Vec<u8>,
}

#[async_trait]
pub trait ReportMailer: Send + Sync {
    async fn send_report(&self, email: &ReportEmail) -> Result<(), MailError>;
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    attachments: Vec<Attachment<'a>>,
}

#[derive(Debug, Serialize)]
struct Attachment<'a> {
    filename: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Result<Self, MailError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_url,
            api_key,
            from,
        })
    }

    fn request_body<'a>(&'a self, email: &'a ReportEmail) -> SendEmailRequest<'a> {
        SendEmailRequest {
            from: &self.from,
            to: vec![email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
            attachments: vec![Attachment {
                filename: REPORT_ATTACHMENT_NAME,
                content: BASE64.encode(&email.pdf),
            }],
        }
    }
}

#[async_trait]
impl ReportMailer for HttpMailer {
    async fn send_report(&self, email: &ReportEmail) -> Result<(), MailError> {
        if email.to.trim().is_empty() {
            return Err(MailError::EmptyRecipient);
        }

        let body = self.request_body(email);
        let mut last_error: Option<MailError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 500ms, 1s
                let delay = std::time::Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Mail send attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(MailError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("Mail API returned {}: {}", status, message);
                last_error = Some(MailError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let raw = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorBody>(&raw)
                    .map(|e| e.message)
                    .unwrap_or(raw);
                return Err(MailError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let sent: SendEmailResponse = response.json().await?;
            debug!("Report email accepted: id={:?}", sent.id);
            return Ok(());
        }

        Err(last_error.unwrap_or(MailError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> HttpMailer {
        HttpMailer::new(
            "http://127.0.0.1:9/emails".to_string(),
            "test-key".to_string(),
            "Reports <reports@example.com>".to_string(),
        )
        .unwrap()
    }

    fn email(to: &str) -> ReportEmail {
        ReportEmail {
            to: to.to_string(),
            subject: "Your numerology report".to_string(),
            html: "<div>report</div>".to_string(),
            pdf: b"%PDF-1.5 test".to_vec(),
        }
    }

    #[test]
    fn test_request_body_attaches_pdf_as_base64() {
        let mailer = mailer();
        let email = email("ann@example.com");
        let json = serde_json::to_value(mailer.request_body(&email)).unwrap();

        assert_eq!(json["from"], "Reports <reports@example.com>");
        assert_eq!(json["to"][0], "ann@example.com");
        assert_eq!(json["subject"], "Your numerology report");
        assert_eq!(json["attachments"][0]["filename"], REPORT_ATTACHMENT_NAME);
        let decoded = BASE64
            .decode(json["attachments"][0]["content"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, email.pdf);
    }

    #[tokio::test]
    async fn test_empty_recipient_is_rejected_before_sending() {
        let err = mailer().send_report(&email("   ")).await.unwrap_err();
        assert!(matches!(err, MailError::EmptyRecipient));
    }
}
