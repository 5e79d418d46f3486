use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use serde_json::Value;

use crate::cli::Dataset;

use super::lookup::LookupRegistry;
use super::normalize::Normalizer;

#[derive(Debug, Default)]
pub(crate) struct CommitStats {
    pub characters_inserted: usize,
    pub appearance_rows_inserted: usize,
    pub heroes_inserted: usize,
    pub powerstat_rows_inserted: usize,
    pub lookup_rows_created: usize,
}

/// Normalizes and persists one run's worth of accepted records in a single
/// transaction. Every insert is duplicate-safe, so re-committing the same
/// records is a no-op; a crash before commit loses only unwritten rows.
pub(crate) fn commit_records(
    connection: &mut Connection,
    dataset: Dataset,
    records: &[Value],
) -> Result<CommitStats> {
    let normalizer = Normalizer::new()?;
    let mut registry = LookupRegistry::default();
    let mut stats = CommitStats::default();

    let tx = connection
        .transaction()
        .context("failed to begin ingest transaction")?;

    {
        match dataset {
            Dataset::Disney => {
                let mut insert_character = tx.prepare(
                    "INSERT OR IGNORE INTO characters(id, name, image_url) VALUES(?1, ?2, ?3)",
                )?;
                let mut insert_appearance = tx.prepare(
                    "INSERT OR IGNORE INTO character_media(character_id, media_type_id, media_title_id)
                     VALUES(?1, ?2, ?3)",
                )?;

                for record in records {
                    let Some(normalized) = normalizer.character(&tx, &mut registry, record)?
                    else {
                        continue;
                    };

                    stats.characters_inserted += insert_character.execute(params![
                        normalized.character.id,
                        normalized.character.name,
                        normalized.character.image_url,
                    ])?;

                    for appearance in &normalized.appearances {
                        stats.appearance_rows_inserted += insert_appearance.execute(params![
                            appearance.character_id,
                            appearance.media_type_id,
                            appearance.media_title_id,
                        ])?;
                    }
                }
            }
            Dataset::Heroes => {
                let mut insert_hero = tx.prepare(
                    "INSERT OR IGNORE INTO heroes
                     (id, name_id, publisher_id, alignment_id, gender_id, race_id, height_cm, weight_kg)
                     VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )?;
                let mut insert_powerstats = tx.prepare(
                    "INSERT OR IGNORE INTO powerstats
                     (hero_id, intelligence, strength, speed, durability, power, combat)
                     VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )?;

                for record in records {
                    let Some(normalized) = normalizer.hero(&tx, &mut registry, record)? else {
                        continue;
                    };

                    stats.heroes_inserted += insert_hero.execute(params![
                        normalized.hero.id,
                        normalized.hero.name_id,
                        normalized.hero.publisher_id,
                        normalized.hero.alignment_id,
                        normalized.hero.gender_id,
                        normalized.hero.race_id,
                        normalized.hero.height_cm,
                        normalized.hero.weight_kg,
                    ])?;

                    stats.powerstat_rows_inserted += insert_powerstats.execute(params![
                        normalized.powerstats.hero_id,
                        normalized.powerstats.intelligence,
                        normalized.powerstats.strength,
                        normalized.powerstats.speed,
                        normalized.powerstats.durability,
                        normalized.powerstats.power,
                        normalized.powerstats.combat,
                    ])?;
                }
            }
        }
    }

    stats.lookup_rows_created = registry.created;

    tx.commit().context("failed to commit ingest transaction")?;
    Ok(stats)
}
