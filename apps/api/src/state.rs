use std::sync::Arc;

use crate::config::Config;
use crate::mailer::ReportMailer;
use crate::profiles::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable profile store. Default: PgProfileStore.
    pub profiles: Arc<dyn ProfileStore>,
    /// Pluggable mail transport. Default: HttpMailer.
    pub mailer: Arc<dyn ReportMailer>,
    pub config: Config,
}

#[cfg(test)]
pub(crate) fn test_state(
    profiles: Arc<dyn ProfileStore>,
    mailer: Arc<dyn ReportMailer>,
) -> AppState {
    AppState {
        profiles,
        mailer,
        config: Config {
            database_url: "postgres://localhost/numerology_test".to_string(),
            mail_api_url: "http://127.0.0.1:9/emails".to_string(),
            mail_api_key: "test-key".to_string(),
            mail_from: "Reports <reports@example.com>".to_string(),
            report_email_subject: "Your numerology report".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        },
    }
}
