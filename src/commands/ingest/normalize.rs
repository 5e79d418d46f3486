use anyhow::{Context, Result};
use regex::Regex;
use rusqlite::Connection;
use serde_json::Value;
use tracing::warn;

use crate::model::{RawCharacter, RawHero};

use super::lookup::{LookupRegistry, LookupTable};

#[derive(Debug, Clone)]
pub(crate) struct CharacterRow {
    pub id: i64,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct AppearanceRow {
    pub character_id: i64,
    pub media_type_id: i64,
    pub media_title_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct NormalizedCharacter {
    pub character: CharacterRow,
    pub appearances: Vec<AppearanceRow>,
}

#[derive(Debug, Clone)]
pub(crate) struct HeroRow {
    pub id: i64,
    pub name_id: Option<i64>,
    pub publisher_id: Option<i64>,
    pub alignment_id: Option<i64>,
    pub gender_id: Option<i64>,
    pub race_id: Option<i64>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone)]
pub(crate) struct PowerstatRow {
    pub hero_id: i64,
    pub intelligence: Option<i64>,
    pub strength: Option<i64>,
    pub speed: Option<i64>,
    pub durability: Option<i64>,
    pub power: Option<i64>,
    pub combat: Option<i64>,
}

#[derive(Debug, Clone)]
pub(crate) struct NormalizedHero {
    pub hero: HeroRow,
    pub powerstats: PowerstatRow,
}

/// Converts one raw API record into normalized rows, resolving categorical
/// strings through the lookup registry. Missing fields become nulls; a
/// record without its identity field normalizes to `None`.
pub(crate) struct Normalizer {
    unit_pattern: Regex,
}

impl Normalizer {
    pub(crate) fn new() -> Result<Self> {
        let unit_pattern = Regex::new(r"^(?P<value>[0-9]+(?:\.[0-9]+)?)\s*(?P<unit>[a-zA-Z]+)$")
            .context("failed to compile unit value regex")?;
        Ok(Self { unit_pattern })
    }

    pub(crate) fn character(
        &self,
        connection: &Connection,
        registry: &mut LookupRegistry,
        raw: &Value,
    ) -> Result<Option<NormalizedCharacter>> {
        let record: RawCharacter = match serde_json::from_value(raw.clone()) {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "skipping undecodable character record");
                return Ok(None);
            }
        };

        let Some(id) = record.id else {
            return Ok(None);
        };

        let media_lists: [(&str, &[String]); 5] = [
            ("films", &record.films),
            ("shortFilms", &record.short_films),
            ("tvShows", &record.tv_shows),
            ("videoGames", &record.video_games),
            ("parkAttractions", &record.park_attractions),
        ];

        let mut appearances = Vec::new();
        for (media_type, titles) in media_lists {
            if titles.is_empty() {
                continue;
            }
            let Some(media_type_id) =
                registry.resolve(connection, LookupTable::MediaTypes, Some(media_type))?
            else {
                continue;
            };
            for title in titles {
                let Some(media_title_id) =
                    registry.resolve(connection, LookupTable::MediaTitles, Some(title))?
                else {
                    continue;
                };
                appearances.push(AppearanceRow {
                    character_id: id,
                    media_type_id,
                    media_title_id,
                });
            }
        }

        Ok(Some(NormalizedCharacter {
            character: CharacterRow {
                id,
                name: record.name,
                image_url: record.image_url,
            },
            appearances,
        }))
    }

    pub(crate) fn hero(
        &self,
        connection: &Connection,
        registry: &mut LookupRegistry,
        raw: &Value,
    ) -> Result<Option<NormalizedHero>> {
        let record: RawHero = match serde_json::from_value(raw.clone()) {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "skipping undecodable hero record");
                return Ok(None);
            }
        };

        let Some(id) = record.id else {
            return Ok(None);
        };

        let name_id = registry.resolve(connection, LookupTable::HeroNames, record.name.as_deref())?;
        let publisher_id = registry.resolve(
            connection,
            LookupTable::Publishers,
            record.biography.publisher.as_deref(),
        )?;

        // Alignment is the one category that keeps an explicit "unknown"
        // label instead of a null reference when the source omits it.
        let alignment_label = match record.biography.alignment.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => "unknown",
        };
        let alignment_id =
            registry.resolve(connection, LookupTable::Alignments, Some(alignment_label))?;

        let gender_id = registry.resolve(
            connection,
            LookupTable::Genders,
            record.appearance.gender.as_deref(),
        )?;
        let race_id = registry.resolve(
            connection,
            LookupTable::Races,
            record.appearance.race.as_deref(),
        )?;

        let height_cm = self.unit_value(&record.appearance.height, "cm");
        let weight_kg = self.unit_value(&record.appearance.weight, "kg");

        let powerstats = PowerstatRow {
            hero_id: id,
            intelligence: parse_stat_value(record.powerstats.intelligence.as_ref()),
            strength: parse_stat_value(record.powerstats.strength.as_ref()),
            speed: parse_stat_value(record.powerstats.speed.as_ref()),
            durability: parse_stat_value(record.powerstats.durability.as_ref()),
            power: parse_stat_value(record.powerstats.power.as_ref()),
            combat: parse_stat_value(record.powerstats.combat.as_ref()),
        };

        Ok(Some(NormalizedHero {
            hero: HeroRow {
                id,
                name_id,
                publisher_id,
                alignment_id,
                gender_id,
                race_id,
                height_cm,
                weight_kg,
            },
            powerstats,
        }))
    }

    /// Scans a list of differently-unit-tagged strings (`["5'9", "175 cm"]`)
    /// for the entry carrying the wanted unit suffix and parses its numeric
    /// part. No parsing entry means `None`, never an error.
    pub(crate) fn unit_value(&self, entries: &[String], unit: &str) -> Option<f64> {
        for entry in entries {
            let Some(captures) = self.unit_pattern.captures(entry.trim()) else {
                continue;
            };
            if !captures["unit"].eq_ignore_ascii_case(unit) {
                continue;
            }
            if let Ok(value) = captures["value"].parse::<f64>() {
                return Some(value);
            }
        }
        None
    }
}

/// Stats arrive as integers or numeric strings depending on the API mirror;
/// anything else parses to `None`.
pub(crate) fn parse_stat_value(raw: Option<&Value>) -> Option<i64> {
    match raw? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            text.parse().ok()
        }
        _ => None,
    }
}
