// Report API
// Request validation, the report pipeline and its HTTP handlers.
// The pipeline is the only place that touches the engine, renderers, mailer
// and profile store together.

pub mod handlers;
pub mod pipeline;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::numerology::NumerologyReport;

/// Request body for `POST /api/report`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub full_name: String,
    pub birth_date: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportFiles {
    /// Base64 PDF.
    pub pdf: String,
    /// Base64 DOCX.
    pub docx: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub ok: bool,
    pub report: NumerologyReport,
    pub files: ReportFiles,
}

/// Accepts `local@domain` with no whitespace and a non-empty part on each side.
pub fn validate_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim();
    let invalid = || AppError::Validation(format!("Invalid email address: '{email}'"));

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email.to_string())
        }
        _ => Err(invalid()),
    }
}
