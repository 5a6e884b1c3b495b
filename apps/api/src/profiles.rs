//! Profile persistence — pluggable store keyed by user id.
//!
//! `AppState` holds an `Arc<dyn ProfileStore>`; production uses
//! `PgProfileStore`, tests use an in-memory store.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::profile::{NewProfile, ProfileRow};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Inserts or replaces the profile for `profile.user_id`.
    async fn upsert(&self, profile: &NewProfile) -> Result<(), AppError>;

    async fn find(&self, user_id: &str) -> Result<Option<ProfileRow>, AppError>;
}

/// PostgreSQL-backed store over the `profiles` table.
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn upsert(&self, profile: &NewProfile) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, email, full_name, birth_date, report_json)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                email = EXCLUDED.email,
                full_name = EXCLUDED.full_name,
                birth_date = EXCLUDED.birth_date,
                report_json = EXCLUDED.report_json,
                updated_at = now()
            "#,
        )
        .bind(&profile.user_id)
        .bind(&profile.email)
        .bind(&profile.full_name)
        .bind(profile.birth_date)
        .bind(Json(&profile.report))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &str) -> Result<Option<ProfileRow>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT user_id, email, full_name, birth_date, report_json AS report, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    /// In-memory store for handler and pipeline tests.
    #[derive(Default)]
    pub(crate) struct MemoryProfileStore {
        rows: Mutex<HashMap<String, ProfileRow>>,
        pub(crate) fail: bool,
    }

    impl MemoryProfileStore {
        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub(crate) fn get(&self, user_id: &str) -> Option<ProfileRow> {
            self.rows.lock().unwrap().get(user_id).cloned()
        }
    }

    #[async_trait]
    impl ProfileStore for MemoryProfileStore {
        async fn upsert(&self, profile: &NewProfile) -> Result<(), AppError> {
            if self.fail {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            let row = ProfileRow {
                user_id: profile.user_id.clone(),
                email: profile.email.clone(),
                full_name: profile.full_name.clone(),
                birth_date: profile.birth_date,
                report: profile.report.clone(),
                updated_at: Utc::now(),
            };
            self.rows
                .lock()
                .unwrap()
                .insert(profile.user_id.clone(), row);
            Ok(())
        }

        async fn find(&self, user_id: &str) -> Result<Option<ProfileRow>, AppError> {
            Ok(self.get(user_id))
        }
    }

    #[tokio::test]
    async fn test_memory_store_upsert_replaces_row() {
        let store = MemoryProfileStore::default();
        let report = crate::numerology::calculate("Nguyen Van A", "1990-05-15").unwrap();
        let mut profile = NewProfile {
            user_id: "user-1".to_string(),
            email: "a@example.com".to_string(),
            full_name: "Nguyen Van A".to_string(),
            birth_date: chrono::NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
            report,
        };
        store.upsert(&profile).await.unwrap();

        profile.full_name = "Nguyen Van B".to_string();
        store.upsert(&profile).await.unwrap();

        let row = store.find("user-1").await.unwrap().unwrap();
        assert_eq!(row.full_name, "Nguyen Van B");
        assert!(store.find("user-2").await.unwrap().is_none());
    }
}
