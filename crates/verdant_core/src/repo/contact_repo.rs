//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the stable CRUD and query surface over `contacts` storage.
//! - Assign server-side identity and creation time on insert.
//!
//! # Invariants
//! - `created_at` is issued by the store clock and strictly increases
//!   across the creation sequence within one process.
//! - `status` persists only the four enumerated tokens.
//! - Listings are ordered by `created_at` descending, id ascending on ties.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::contact::{
    ContactId, ContactStatus, ContactSubmission, ContactValidationError, NewContact,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    phone,
    message,
    status,
    notes,
    created_at
FROM contacts";

/// Trailing window used by `counts()` for the recent-activity bucket.
pub const SEVEN_DAYS_MS: i64 = 7 * 24 * 3600 * 1000;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Dashboard aggregate over the whole inbox.
///
/// Archived submissions contribute to `total` only; there is no named
/// bucket for them. `last_seven_days` is a sliding window recomputed on
/// every call, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactCounts {
    pub total: u64,
    pub new: u64,
    pub read: u64,
    pub responded: u64,
    pub last_seven_days: u64,
}

/// Repository interface for contact-store operations.
pub trait ContactRepository {
    /// Inserts a new submission with `status=new` and a store-issued
    /// `created_at`, returning the new record's id.
    fn create(&self, request: &NewContact) -> RepoResult<ContactId>;
    /// Partial update of exactly the `status` field.
    fn update_status(&self, id: ContactId, status: ContactStatus) -> RepoResult<()>;
    /// Partial update of exactly the `notes` field; overwrites any prior
    /// note (last-write-wins).
    fn set_note(&self, id: ContactId, notes: &str) -> RepoResult<()>;
    /// Hard delete. Deleting a missing record is an error, not a no-op.
    fn delete(&self, id: ContactId) -> RepoResult<()>;
    /// Point lookup; a missing record is `Ok(None)`, not an error.
    fn get(&self, id: ContactId) -> RepoResult<Option<ContactSubmission>>;
    /// All submissions, or only those in `status`, most recent first.
    fn list(&self, status: Option<ContactStatus>) -> RepoResult<Vec<ContactSubmission>>;
    /// Mandatory-status listing, equivalent to `list(Some(status))`.
    fn get_by_status(&self, status: ContactStatus) -> RepoResult<Vec<ContactSubmission>>;
    /// Full-scan aggregate for the dashboard. O(total records) by design;
    /// treat as a scaling boundary rather than caching here.
    fn counts(&self) -> RepoResult<ContactCounts>;
}

// Store clock state. Strictly-increasing issue order keeps descending
// listings deterministic even when inserts land within the same
// wall-clock millisecond.
static LAST_ISSUED_MS: AtomicI64 = AtomicI64::new(0);

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

fn next_created_at() -> i64 {
    let wall = now_ms();
    // The closure is total, so `fetch_update` cannot fail; either arm
    // carries the stamp the update was computed from.
    match LAST_ISSUED_MS.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(wall.max(last + 1))
    }) {
        Ok(last) | Err(last) => wall.max(last + 1),
    }
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a bootstrapped connection, rejecting connections that did not
    /// go through migration.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let contacts_table: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'contacts'
            );",
            [],
            |row| row.get(0),
        )?;
        if contacts_table != 1 {
            return Err(RepoError::MissingRequiredTable("contacts"));
        }

        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create(&self, request: &NewContact) -> RepoResult<ContactId> {
        request.validate()?;

        let id = Uuid::new_v4();
        let created_at = next_created_at();

        self.conn.execute(
            "INSERT INTO contacts (id, name, email, phone, message, status, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7);",
            params![
                id.to_string(),
                request.name.as_str(),
                request.email.as_str(),
                request.phone.as_deref(),
                request.message.as_str(),
                ContactStatus::New.as_str(),
                created_at,
            ],
        )?;

        Ok(id)
    }

    fn update_status(&self, id: ContactId, status: ContactStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE contacts SET status = ?1 WHERE id = ?2;",
            params![status.as_str(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn set_note(&self, id: ContactId, notes: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE contacts SET notes = ?1 WHERE id = ?2;",
            params![notes, id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get(&self, id: ContactId) -> RepoResult<Option<ContactSubmission>> {
        let row = self
            .conn
            .query_row(
                &format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"),
                [id.to_string()],
                RawContactRow::read,
            )
            .optional()?;

        match row {
            Some(raw) => Ok(Some(raw.into_submission()?)),
            None => Ok(None),
        }
    }

    fn list(&self, status: Option<ContactStatus>) -> RepoResult<Vec<ContactSubmission>> {
        let mut sql = CONTACT_SELECT_SQL.to_string();
        if status.is_some() {
            sql.push_str(" WHERE status = ?1");
        }
        sql.push_str(" ORDER BY created_at DESC, id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = match status {
            Some(status) => stmt.query([status.as_str()])?,
            None => stmt.query([])?,
        };

        let mut submissions = Vec::new();
        while let Some(row) = rows.next()? {
            submissions.push(RawContactRow::read(row)?.into_submission()?);
        }

        Ok(submissions)
    }

    fn get_by_status(&self, status: ContactStatus) -> RepoResult<Vec<ContactSubmission>> {
        self.list(Some(status))
    }

    fn counts(&self) -> RepoResult<ContactCounts> {
        let window_start = now_ms() - SEVEN_DAYS_MS;

        let counts = self.conn.query_row(
            "SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'new'),
                COUNT(*) FILTER (WHERE status = 'read'),
                COUNT(*) FILTER (WHERE status = 'responded'),
                COUNT(*) FILTER (WHERE created_at > ?1)
             FROM contacts;",
            [window_start],
            |row| {
                Ok(ContactCounts {
                    total: row.get::<_, i64>(0)? as u64,
                    new: row.get::<_, i64>(1)? as u64,
                    read: row.get::<_, i64>(2)? as u64,
                    responded: row.get::<_, i64>(3)? as u64,
                    last_seven_days: row.get::<_, i64>(4)? as u64,
                })
            },
        )?;

        Ok(counts)
    }
}

// Intermediate row shape so rusqlite row access errors stay separate from
// semantic decode errors.
struct RawContactRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    message: String,
    status: String,
    notes: Option<String>,
    created_at: i64,
}

impl RawContactRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            message: row.get("message")?,
            status: row.get("status")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }

    fn into_submission(self) -> RepoResult<ContactSubmission> {
        let id = Uuid::parse_str(&self.id).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{}` in contacts.id", self.id))
        })?;
        let status = ContactStatus::parse(&self.status).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid status value `{}` in contacts.status",
                self.status
            ))
        })?;

        Ok(ContactSubmission {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            status,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}
