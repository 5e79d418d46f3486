use std::collections::HashSet;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::cli::Dataset;
use crate::util::now_utc_string;

use super::DB_SCHEMA_VERSION;

pub(crate) fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    Ok(())
}

pub(crate) fn ensure_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS characters (
          id INTEGER PRIMARY KEY,
          name TEXT,
          image_url TEXT
        );

        CREATE TABLE IF NOT EXISTS media_types (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS media_titles (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS character_media (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          character_id INTEGER NOT NULL,
          media_type_id INTEGER NOT NULL,
          media_title_id INTEGER NOT NULL,
          UNIQUE(character_id, media_type_id, media_title_id),
          FOREIGN KEY(character_id) REFERENCES characters(id),
          FOREIGN KEY(media_type_id) REFERENCES media_types(id),
          FOREIGN KEY(media_title_id) REFERENCES media_titles(id)
        );

        CREATE TABLE IF NOT EXISTS hero_names (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS publishers (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS alignments (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS genders (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS races (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS heroes (
          id INTEGER PRIMARY KEY,
          name_id INTEGER,
          publisher_id INTEGER,
          alignment_id INTEGER,
          gender_id INTEGER,
          race_id INTEGER,
          height_cm REAL,
          weight_kg REAL,
          FOREIGN KEY(name_id) REFERENCES hero_names(id),
          FOREIGN KEY(publisher_id) REFERENCES publishers(id),
          FOREIGN KEY(alignment_id) REFERENCES alignments(id),
          FOREIGN KEY(gender_id) REFERENCES genders(id),
          FOREIGN KEY(race_id) REFERENCES races(id)
        );

        CREATE TABLE IF NOT EXISTS powerstats (
          hero_id INTEGER PRIMARY KEY,
          intelligence INTEGER,
          strength INTEGER,
          speed INTEGER,
          durability INTEGER,
          power INTEGER,
          combat INTEGER,
          FOREIGN KEY(hero_id) REFERENCES heroes(id)
        );

        CREATE INDEX IF NOT EXISTS idx_character_media_character ON character_media(character_id);
        CREATE INDEX IF NOT EXISTS idx_character_media_type ON character_media(media_type_id);
        CREATE INDEX IF NOT EXISTS idx_heroes_alignment ON heroes(alignment_id);
        ",
    )?;

    let now = now_utc_string();
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [DB_SCHEMA_VERSION],
    )?;
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_updated_at', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [now],
    )?;

    Ok(())
}

pub(crate) fn seed_media_types(connection: &Connection, vocabulary: &[&str]) -> Result<()> {
    let mut statement = connection
        .prepare("INSERT OR IGNORE INTO media_types(name) VALUES(?1)")
        .context("failed to prepare media vocabulary seed")?;

    for media_type in vocabulary {
        statement.execute([media_type])?;
    }

    Ok(())
}

/// Identities already present in the store; the paginator skips these
/// without counting them against the quota.
pub(crate) fn load_known_ids(connection: &Connection, dataset: Dataset) -> Result<HashSet<i64>> {
    let sql = match dataset {
        Dataset::Disney => "SELECT id FROM characters",
        Dataset::Heroes => "SELECT id FROM heroes",
    };

    let mut statement = connection.prepare(sql)?;
    let ids = statement
        .query_map([], |row| row.get::<_, i64>(0))?
        .collect::<rusqlite::Result<HashSet<i64>>>()?;

    Ok(ids)
}
