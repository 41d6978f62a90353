//! # Database Migrations
//!
//! Embedded SQL migrations for Lumen POS.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                          │
//! │                                                                 │
//! │  Startup                                                        │
//! │     │                                                           │
//! │     ▼                                                           │
//! │  Compare embedded migrations vs _sqlx_migrations table          │
//! │     ├── 001_initial_schema.sql ✓ (already applied)              │
//! │     └── 002_settings.sql       ⬜ (pending - runs now)           │
//! │     │                                                           │
//! │     ▼                                                           │
//! │  Run pending migrations in order, record each                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//! 1. Create a new file in `migrations/sqlite/` with the next number
//! 2. Name format: `NNN_description.sql`
//! 3. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 4. NEVER modify existing migrations, always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds all SQL files from the specified
/// directory into the binary at compile time; no runtime file access.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent and ordered; each migration runs in its own transaction.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns (total_migrations, applied_migrations) for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
