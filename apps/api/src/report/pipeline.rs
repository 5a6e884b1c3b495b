//! Report pipeline: validate → calculate → render → (mail ∥ persist) → respond.
//!
//! PDF and DOCX rendering is CPU-bound and runs on the blocking pool, both
//! documents at once. Mail delivery and the profile upsert then run
//! concurrently; either failing fails the request and no files are returned.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::mailer::ReportEmail;
use crate::models::profile::NewProfile;
use crate::numerology::engine::generate_report;
use crate::numerology::{BirthDate, FullName};
use crate::render::{render_docx, render_email_html, render_pdf, ReportContext};
use crate::report::{validate_email, ReportFiles, ReportRequest, ReportResponse};
use crate::state::AppState;

/// Runs the full report pipeline for one authenticated request.
pub async fn run_report_pipeline(
    state: &AppState,
    user: &AuthenticatedUser,
    request: ReportRequest,
) -> Result<ReportResponse, AppError> {
    let email = validate_email(&request.email)?;
    if !user.email_matches(&email) {
        return Err(AppError::Validation(
            "Email must match the signed-in account".to_string(),
        ));
    }

    let full_name = FullName::parse(&request.full_name)?;
    let birth_date = BirthDate::parse(&request.birth_date)?;
    let report = generate_report(&full_name, birth_date);
    info!(
        "Report calculated for user {}: life path {}",
        user.id, report.life_path_number
    );

    let context = ReportContext::new(&full_name, birth_date, report.clone());
    let (pdf, docx) = render_documents(&context).await?;
    info!(
        "Documents rendered: pdf={} bytes, docx={} bytes",
        pdf.len(),
        docx.len()
    );

    let message = ReportEmail {
        to: email.clone(),
        subject: state.config.report_email_subject.clone(),
        html: render_email_html(&context),
        pdf: pdf.clone(),
    };
    let profile = NewProfile {
        user_id: user.id.clone(),
        email,
        full_name: full_name.as_str().to_string(),
        birth_date: birth_date.date(),
        report: report.clone(),
    };

    tokio::try_join!(
        async {
            state
                .mailer
                .send_report(&message)
                .await
                .map_err(AppError::from)
        },
        state.profiles.upsert(&profile),
    )?;
    info!("Report emailed and profile saved for user {}", user.id);

    Ok(ReportResponse {
        ok: true,
        report,
        files: ReportFiles {
            pdf: BASE64.encode(&pdf),
            docx: BASE64.encode(&docx),
        },
    })
}

/// Renders the PDF and DOCX concurrently on the blocking pool.
async fn render_documents(context: &ReportContext) -> Result<(Vec<u8>, Vec<u8>), AppError> {
    let pdf_context = context.clone();
    let docx_context = context.clone();

    let pdf_task = tokio::task::spawn_blocking(move || render_pdf(&pdf_context));
    let docx_task = tokio::task::spawn_blocking(move || render_docx(&docx_context));

    let (pdf, docx) = tokio::try_join!(pdf_task, docx_task).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in rendering: {e}"))
    })?;

    Ok((pdf?, docx?))
}
