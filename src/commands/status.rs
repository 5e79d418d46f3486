use std::fs;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::ingest::DB_FILENAME;

pub fn run(args: StatusArgs) -> Result<()> {
    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| args.data_root.join(DB_FILENAME));
    let manifest_dir = args.data_root.join("manifests");

    info!(data_root = %args.data_root.display(), "status requested");

    if db_path.exists() {
        let connection = Connection::open_with_flags(&db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("failed to open {}", db_path.display()))?;

        let schema_version: String = connection
            .query_row(
                "SELECT value FROM metadata WHERE key = 'db_schema_version'",
                [],
                |row| row.get(0),
            )
            .unwrap_or_default();

        let characters = query_count(&connection, "SELECT COUNT(*) FROM characters").unwrap_or(0);
        let appearance_rows =
            query_count(&connection, "SELECT COUNT(*) FROM character_media").unwrap_or(0);
        let media_titles = query_count(&connection, "SELECT COUNT(*) FROM media_titles").unwrap_or(0);
        let heroes = query_count(&connection, "SELECT COUNT(*) FROM heroes").unwrap_or(0);
        let powerstat_rows = query_count(&connection, "SELECT COUNT(*) FROM powerstats").unwrap_or(0);

        info!(
            path = %db_path.display(),
            schema_version = %schema_version,
            characters,
            appearance_rows,
            media_titles,
            heroes,
            powerstat_rows,
            "database status"
        );
    } else {
        warn!(path = %db_path.display(), "database file missing");
    }

    match fs::read_dir(&manifest_dir) {
        Ok(entries) => {
            let manifest_count = entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| {
                    entry
                        .path()
                        .extension()
                        .is_some_and(|extension| extension == "json")
                })
                .count();
            info!(path = %manifest_dir.display(), manifest_count, "run manifests");
        }
        Err(_) => {
            warn!(path = %manifest_dir.display(), "manifest directory missing");
        }
    }

    Ok(())
}

fn query_count(connection: &Connection, sql: &str) -> Result<i64> {
    let count = connection.query_row(sql, [], |row| row.get(0))?;
    Ok(count)
}
