// src/db/migrations.rs
//
// Database schema initialization and migrations
//
// PRINCIPLES:
// - Explicit schema versions
// - No automatic migrations
// - Clear error messages
// - Idempotent operations

use rusqlite::Connection;

use crate::db::connection::{get_connection, ConnectionPool};
use crate::error::{AppError, AppResult};

/// Current schema version
/// Increment this when adding migrations
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
///
/// This function:
/// 1. Checks current schema version
/// 2. Applies necessary migrations
/// 3. Updates version tracking
///
/// Safe to call multiple times (idempotent).
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        apply_initial_schema(conn)?;
        set_schema_version(conn, CURRENT_SCHEMA_VERSION)?;
        log::info!("Applied schema version {}", CURRENT_SCHEMA_VERSION);
    } else if current_version < CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is outdated. Expected {}. Manual migration required.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    } else if current_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    }

    Ok(())
}

/// Bring a freshly opened pool into service
///
/// Applies the schema, runs the integrity check and returns the table
/// statistics for the startup log. Safe to call on every start.
pub fn prepare_database(pool: &ConnectionPool) -> AppResult<DatabaseStats> {
    let conn = get_connection(pool)?;

    initialize_database(&conn)?;
    verify_database_integrity(&conn)?;

    get_database_stats(&conn)
}

/// Get current schema version
/// Returns 0 if schema_version table doesn't exist (fresh database)
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;

    Ok(())
}

/// Apply initial schema (version 1) from the embedded schema.sql
fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| AppError::Other(format!("Failed to apply initial schema: {}", e)))?;

    Ok(())
}

/// Verify database integrity
///
/// Runs SQLite's integrity check.
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if result != "ok" {
        return Err(AppError::Other(format!(
            "Database integrity check failed: {}",
            result
        )));
    }

    Ok(())
}

/// Get database statistics
///
/// Returns useful info for debugging and monitoring
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    let count = |table: &str| -> AppResult<i64> {
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?;
        Ok(n)
    };

    Ok(DatabaseStats {
        size_bytes: page_count * page_size,
        page_count,
        page_size,
        movie_count: count("movies")?,
        track_count: count("tracks")?,
        rate_count: count("rates")?,
        review_count: count("reviews")?,
    })
}

/// Database statistics
#[derive(Debug)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub movie_count: i64,
    pub track_count: i64,
    pub rate_count: i64,
    pub review_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    #[test]
    fn test_initialize_fresh_database() {
        let conn = create_test_connection().unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 0);

        initialize_database(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 1);

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 5);
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = create_test_connection().unwrap();

        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        set_schema_version(&conn, 99).unwrap();

        assert!(initialize_database(&conn).is_err());
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO tracks (user_id, movie_id, created_at, updated_at)
             VALUES (1, 999, datetime('now'), datetime('now'))",
            [],
        );

        assert!(result.is_err(), "Foreign key constraint should have been violated");
    }

    #[test]
    fn test_tmdb_id_is_unique() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let insert = "INSERT INTO movies (tmdb_id, title, created_at, updated_at)
                      VALUES (27205, 'Inception', datetime('now'), datetime('now'))";
        conn.execute(insert, []).unwrap();

        assert!(conn.execute(insert, []).is_err());
    }

    #[test]
    fn test_rating_range_is_checked() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        conn.execute(
            "INSERT INTO movies (tmdb_id, title, created_at, updated_at)
             VALUES (1, 'A', datetime('now'), datetime('now'))",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO rates (user_id, movie_id, rating, created_at, updated_at)
             VALUES (1, 1, 6.0, datetime('now'), datetime('now'))",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_database_stats() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let stats = get_database_stats(&conn).unwrap();

        assert!(stats.size_bytes > 0);
        assert_eq!(stats.movie_count, 0);
        assert_eq!(stats.track_count, 0);
        assert_eq!(stats.rate_count, 0);
        assert_eq!(stats.review_count, 0);
    }

    #[test]
    fn test_prepare_database_on_file_pool() {
        use crate::db::connection::create_connection_pool;

        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool(&dir.path().join("framerate.db")).unwrap();

        let stats = prepare_database(&pool).unwrap();
        assert_eq!(stats.movie_count, 0);

        {
            let conn = get_connection(&pool).unwrap();
            conn.execute(
                "INSERT INTO movies (tmdb_id, title, created_at, updated_at)
                 VALUES (27205, 'Inception', datetime('now'), datetime('now'))",
                [],
            )
            .unwrap();
        }

        // Second start: schema kept, rows counted
        let stats = prepare_database(&pool).unwrap();
        assert_eq!(stats.movie_count, 1);
        assert!(stats.size_bytes > 0);
    }

    #[test]
    fn test_integrity_check() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        verify_database_integrity(&conn).unwrap();
    }
}
