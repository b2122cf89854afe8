//! SQLite storage for workspace snapshots.
//!
//! Only the opaque JSON export is stored. Nothing in the model layer touches
//! the database; callers snapshot the store and hand it over.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rusqlite::OptionalExtension;
pub use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::snapshot::Snapshot;

/// How many saved snapshots survive pruning.
pub const SNAPSHOT_HISTORY: i64 = 10;

/// Opens (or creates) the database at `path` in WAL mode and migrates it.
///
/// `busy_timeout` is set through the `Connection` method rather than a
/// PRAGMA string so pragma caching cannot swallow it.
///
/// # Errors
///
/// Returns `tokio_rusqlite::Error` if the file cannot be opened or
/// configured, or migration fails.
pub async fn open_db(path: &str) -> std::result::Result<Connection, tokio_rusqlite::Error> {
    let conn = Connection::open(path).await?;

    conn.call(|db| -> rusqlite::Result<()> {
        db.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;",
        )?;
        db.busy_timeout(Duration::from_secs(5))?;
        // Fold any WAL left over from an unclean exit back into the main file.
        db.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        crate::schema::migrate(db)
    })
    .await?;

    Ok(conn)
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Appends `snapshot` and prunes all but the newest [`SNAPSHOT_HISTORY`]
/// rows, in one `BEGIN IMMEDIATE` transaction. Returns the new row id.
///
/// # Errors
///
/// `Error::Serialize` if the snapshot cannot be encoded,
/// `Error::Database` if the write fails.
pub async fn save_snapshot(conn: &Connection, snapshot: &Snapshot) -> Result<i64> {
    let payload = snapshot.to_json()?;
    let active_group_id = snapshot.active_group_id.clone();

    let row_id = conn
        .call(move |db| -> rusqlite::Result<i64> {
            let tx = db.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
            tx.execute(
                "INSERT INTO workspace_snapshots (active_group_id, payload, saved_at)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![&active_group_id, &payload, now_secs()],
            )?;
            let row_id = tx.last_insert_rowid();
            tx.execute(
                "DELETE FROM workspace_snapshots
                 WHERE id NOT IN (
                     SELECT id FROM workspace_snapshots ORDER BY id DESC LIMIT ?1
                 )",
                rusqlite::params![SNAPSHOT_HISTORY],
            )?;
            tx.commit()?;
            Ok(row_id)
        })
        .await?;

    tracing::debug!(row_id, "snapshot saved");
    Ok(row_id)
}

/// Loads the most recently saved snapshot, `None` on a fresh database.
///
/// # Errors
///
/// `Error::MalformedSnapshot` if the stored payload no longer parses,
/// `Error::Database` if the query fails.
pub async fn load_latest_snapshot(conn: &Connection) -> Result<Option<Snapshot>> {
    let row = conn
        .call(|db| -> rusqlite::Result<Option<(Option<String>, String)>> {
            db.query_row(
                "SELECT active_group_id, payload FROM workspace_snapshots
                 ORDER BY id DESC
                 LIMIT 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()
        })
        .await?;

    let Some((active_group_id, payload)) = row else {
        return Ok(None);
    };
    let mut snapshot = Snapshot::from_json(&payload)?;
    snapshot.active_group_id = active_group_id;
    Ok(Some(snapshot))
}

/// Number of stored snapshots.
pub async fn snapshot_count(conn: &Connection) -> Result<i64> {
    let count = conn
        .call(|db| -> rusqlite::Result<i64> {
            db.query_row("SELECT COUNT(*) FROM workspace_snapshots", [], |r| r.get(0))
        })
        .await?;
    Ok(count)
}
