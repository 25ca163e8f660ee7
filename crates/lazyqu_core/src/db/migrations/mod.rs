//! Schema steps for the planner database.
//!
//! The planner needs a single key/value table; each later schema change adds
//! one numbered SQL file here.
//!
//! # Invariants
//! - Step numbers start at 1 and increase by one.
//! - `PRAGMA user_version` holds the number of the last step applied.
//! - A database newer than this binary is refused, never downgraded.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// `(schema version, SQL)` in application order.
const SCHEMA_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_store.sql"))];

/// Highest schema version this binary can create.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to `latest_version`.
///
/// Missing steps run inside a single transaction, so a failing step leaves
/// the file at its previous version.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `Sqlite` when a step fails.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let on_disk: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();
    if on_disk > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: on_disk,
            latest_supported: latest,
        });
    }

    let missing: Vec<&(u32, &str)> = SCHEMA_STEPS
        .iter()
        .filter(|(version, _)| *version > on_disk)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in missing {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;
    Ok(())
}
