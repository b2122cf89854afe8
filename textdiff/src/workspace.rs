//! Loading and saving the group store through the snapshot database.
//!
//! Shared by the terminal UI and the headless subcommands so both see the same
//! workspace.

use std::path::Path;

use textdiff_core::db::{self, Connection};
use textdiff_core::GroupStore;

/// Creates the parent directory if needed and opens the database.
pub async fn open(path: &Path) -> std::io::Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    db::open_db(&path.to_string_lossy())
        .await
        .map_err(std::io::Error::other)
}

/// Restores the most recent snapshot, or the default state when there is none.
///
/// A snapshot that no longer parses is logged and skipped; older rows stay in
/// the table untouched until pruning reaches them.
pub async fn load(conn: &Connection) -> std::io::Result<GroupStore> {
    let mut store = GroupStore::new();
    match db::load_latest_snapshot(conn).await {
        Ok(Some(snapshot)) => {
            if let Err(e) = store.restore(snapshot) {
                tracing::warn!(error = %e, "saved workspace rejected, starting fresh");
            }
        }
        Ok(None) => tracing::info!("no saved workspace, starting fresh"),
        Err(textdiff_core::Error::MalformedSnapshot(reason)) => {
            tracing::warn!(%reason, "saved workspace unreadable, starting fresh");
        }
        Err(e) => return Err(std::io::Error::other(e)),
    }
    Ok(store)
}

pub async fn save(conn: &Connection, store: &GroupStore) -> std::io::Result<()> {
    db::save_snapshot(conn, &store.snapshot())
        .await
        .map(|_| ())
        .map_err(std::io::Error::other)
}
