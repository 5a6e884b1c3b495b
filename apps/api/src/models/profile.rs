use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::numerology::NumerologyReport;

/// A stored profile: the last submitted name, birth date and report.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRow {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    /// Selected as `report_json AS report`.
    #[sqlx(json)]
    pub report: NumerologyReport,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload, keyed by `user_id`.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub report: NumerologyReport,
}
