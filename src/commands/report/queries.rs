use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AppearanceCount {
    pub character_id: i64,
    pub name: Option<String>,
    pub appearances: i64,
}

/// Full ranked list of characters by fact-row count, zero for characters
/// with no appearances. Equal counts order by ascending character id so the
/// ranking is deterministic.
pub(crate) fn appearance_counts(connection: &Connection) -> Result<Vec<AppearanceCount>> {
    let mut statement = connection
        .prepare(
            "SELECT c.id, c.name, COUNT(cm.id) AS appearances
             FROM characters c
             LEFT JOIN character_media cm ON cm.character_id = c.id
             GROUP BY c.id
             ORDER BY appearances DESC, c.id ASC",
        )
        .context("failed to prepare appearance count query")?;

    let rows = statement
        .query_map([], |row| {
            Ok(AppearanceCount {
                character_id: row.get(0)?,
                name: row.get(1)?,
                appearances: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AppearanceSummary {
    pub total_characters: usize,
    pub mean_appearances: f64,
    pub top: Vec<AppearanceCount>,
}

pub(crate) fn summarize_appearances(
    ranked: &[AppearanceCount],
    top_n: usize,
) -> AppearanceSummary {
    let total_characters = ranked.len();
    let total_appearances: i64 = ranked.iter().map(|row| row.appearances).sum();
    let mean_appearances = if total_characters == 0 {
        0.0
    } else {
        total_appearances as f64 / total_characters as f64
    };

    AppearanceSummary {
        total_characters,
        mean_appearances,
        top: ranked.iter().take(top_n).cloned().collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct MediaSpread {
    pub character_id: i64,
    pub name: Option<String>,
    pub spread: i64,
}

/// Count of distinct media types each character has at least one appearance
/// in, bounded by the size of the seeded vocabulary. The limit is a bound
/// parameter, never interpolated into the statement.
pub(crate) fn media_spread(connection: &Connection, limit: usize) -> Result<Vec<MediaSpread>> {
    let mut statement = connection
        .prepare(
            "SELECT c.id, c.name, COUNT(DISTINCT cm.media_type_id) AS spread
             FROM characters c
             LEFT JOIN character_media cm ON cm.character_id = c.id
             GROUP BY c.id
             ORDER BY spread DESC, c.id ASC
             LIMIT ?1",
        )
        .context("failed to prepare media spread query")?;

    let rows = statement
        .query_map([limit as i64], |row| {
            Ok(MediaSpread {
                character_id: row.get(0)?,
                name: row.get(1)?,
                spread: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AlignmentAverages {
    pub alignment: String,
    pub intelligence: Option<f64>,
    pub strength: Option<f64>,
    pub speed: Option<f64>,
    pub durability: Option<f64>,
    pub power: Option<f64>,
    pub combat: Option<f64>,
}

/// Mean of each power stat per alignment group, over non-null values only.
/// SQL AVG skips nulls and yields NULL for an all-null group, so a stat with
/// no data reports as absent rather than zero.
pub(crate) fn alignment_averages(connection: &Connection) -> Result<Vec<AlignmentAverages>> {
    let mut statement = connection
        .prepare(
            "SELECT a.name,
                    AVG(p.intelligence), AVG(p.strength), AVG(p.speed),
                    AVG(p.durability), AVG(p.power), AVG(p.combat)
             FROM heroes h
             JOIN alignments a ON h.alignment_id = a.id
             JOIN powerstats p ON p.hero_id = h.id
             GROUP BY a.id
             ORDER BY a.name ASC",
        )
        .context("failed to prepare alignment averages query")?;

    let rows = statement
        .query_map([], |row| {
            Ok(AlignmentAverages {
                alignment: row.get(0)?,
                intelligence: row.get(1)?,
                strength: row.get(2)?,
                speed: row.get(3)?,
                durability: row.get(4)?,
                power: row.get(5)?,
                combat: row.get(6)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PowerIndex {
    pub hero_id: i64,
    pub name: Option<String>,
    pub power_index: f64,
}

/// Mean of the non-null stats per hero; heroes whose stats are all null are
/// omitted. Descending by index, ascending hero id on ties.
pub(crate) fn power_index(connection: &Connection, limit: usize) -> Result<Vec<PowerIndex>> {
    let mut statement = connection
        .prepare(
            "SELECT h.id, n.name,
                    p.intelligence, p.strength, p.speed, p.durability, p.power, p.combat
             FROM heroes h
             LEFT JOIN hero_names n ON h.name_id = n.id
             JOIN powerstats p ON p.hero_id = h.id",
        )
        .context("failed to prepare power index query")?;

    let rows = statement
        .query_map([], |row| {
            let stats: [Option<i64>; 6] = [
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
            ];
            Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?, stats))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut results = Vec::new();
    for (hero_id, name, stats) in rows {
        let values: Vec<i64> = stats.iter().flatten().copied().collect();
        if values.is_empty() {
            continue;
        }
        let power_index = values.iter().sum::<i64>() as f64 / values.len() as f64;
        results.push(PowerIndex {
            hero_id,
            name,
            power_index,
        });
    }

    results.sort_by(|a, b| {
        b.power_index
            .total_cmp(&a.power_index)
            .then(a.hero_id.cmp(&b.hero_id))
    });
    results.truncate(limit);

    Ok(results)
}
