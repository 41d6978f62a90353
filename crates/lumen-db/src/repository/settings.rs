//! # Settings Repository
//!
//! Persistence for the single [`StoreSettings`] record.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  settings table: exactly one row (id = 1), data = JSON blob     │
//! │                                                                 │
//! │  load() ── no row?        ──► StoreSettings::default()          │
//! │        └── malformed JSON ──► StoreSettings::default()          │
//! │        └── partial JSON   ──► defaults fill the gaps (serde)    │
//! │                                                                 │
//! │  save() ── INSERT OR REPLACE the whole blob                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A settings blob that fails to parse must never brick the register,
//! so load() degrades to defaults instead of erroring.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::DbResult;
use lumen_core::StoreSettings;

/// Repository for the settings blob.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Loads the store settings, falling back to defaults when the row
    /// is missing or its JSON no longer parses.
    pub async fn load(&self) -> DbResult<StoreSettings> {
        let data: Option<String> =
            sqlx::query_scalar("SELECT data FROM settings WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;

        let settings = match data {
            None => {
                debug!("No settings row, using defaults");
                StoreSettings::default()
            }
            Some(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(error = %err, "Stored settings unreadable, using defaults");
                    StoreSettings::default()
                }
            },
        };

        Ok(settings)
    }

    /// Saves the store settings, replacing any existing row.
    pub async fn save(&self, settings: &StoreSettings) -> DbResult<()> {
        let json = serde_json::to_string(settings)
            .map_err(|e| crate::error::DbError::Internal(e.to_string()))?;

        debug!("Saving settings");

        sqlx::query(
            "INSERT INTO settings (id, data, updated_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
        )
        .bind(&json)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use lumen_core::TaxConfig;

    #[tokio::test]
    async fn test_missing_row_yields_defaults() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let settings = db.settings().load().await.unwrap();
        assert_eq!(settings, StoreSettings::default());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();

        let mut settings = StoreSettings::default();
        settings.store_name = "Corner Shop".to_string();
        settings.tax = TaxConfig::inclusive(500);

        repo.save(&settings).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), settings);

        // Saving again replaces, never duplicates
        settings.store_name = "Corner Shop 2".to_string();
        repo.save(&settings).await.unwrap();
        assert_eq!(repo.load().await.unwrap().store_name, "Corner Shop 2");
    }

    #[tokio::test]
    async fn test_malformed_blob_degrades_to_defaults() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        sqlx::query("INSERT INTO settings (id, data, updated_at) VALUES (1, 'not json', ?1)")
            .bind(Utc::now())
            .execute(db.pool())
            .await
            .unwrap();

        let settings = db.settings().load().await.unwrap();
        assert_eq!(settings, StoreSettings::default());
    }
}
