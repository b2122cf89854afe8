/// DDL for the schema_version tracking table.
///
/// Applied unconditionally on every open, before the version is read.
pub const SCHEMA_VERSION_DDL: &str = "
    CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER NOT NULL
    ) STRICT;
";

/// DDL for the v1 schema.
///
/// `workspace_snapshots` holds the JSON export of the whole group store,
/// one row per save, with the active group kept beside the payload since the
/// export format does not carry it. Groups and text sets are deliberately
/// not modelled relationally: the payload is opaque to SQLite.
pub const SCHEMA_V1_SQL: &str = "
    CREATE TABLE IF NOT EXISTS workspace_snapshots (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        active_group_id TEXT,
        payload         TEXT    NOT NULL,
        saved_at        INTEGER NOT NULL
    ) STRICT;

    CREATE INDEX IF NOT EXISTS workspace_snapshots_saved_at
        ON workspace_snapshots (saved_at);
";

/// Brings the database to the latest schema version. Idempotent.
///
/// 1. Creates `schema_version` if missing.
/// 2. Reads the current version (`0` when empty).
/// 3. Below 1: drops any table of the same name left by an unversioned
///    build, applies `SCHEMA_V1_SQL` inside `BEGIN IMMEDIATE`, records 1.
///
/// # Errors
///
/// Returns `rusqlite::Error` if DDL fails or the version cannot be read.
pub fn migrate(db: &mut rusqlite::Connection) -> rusqlite::Result<()> {
    db.execute_batch(SCHEMA_VERSION_DDL)?;

    let version: i64 = db
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if version < 1 {
        let tx = db.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        tx.execute_batch("DROP TABLE IF EXISTS workspace_snapshots;")?;
        tx.execute_batch(SCHEMA_V1_SQL)?;
        tx.execute("INSERT INTO schema_version (version) VALUES (1)", [])?;
        tx.commit()?;
    }

    Ok(())
}
