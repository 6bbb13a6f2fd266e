//! Connection bootstrap utilities.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure required pragmas and trigger migrations before returning.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the contacts database file and applies pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    finish_open(Connection::open(path), "file")
}

/// Opens an in-memory database and applies pending migrations.
///
/// Intended for tests and smoke probes.
pub fn open_db_in_memory() -> DbResult<Connection> {
    finish_open(Connection::open_in_memory(), "memory")
}

fn finish_open(opened: rusqlite::Result<Connection>, mode: &str) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = opened.map_err(Into::into).and_then(|mut conn| {
        bootstrap_connection(&mut conn)?;
        Ok(conn)
    });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }

    result
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}
