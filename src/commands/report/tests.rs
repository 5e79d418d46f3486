use rusqlite::Connection;
use serde_json::{Value, json};

use crate::cli::Dataset;
use crate::commands::ingest::MEDIA_TYPE_VOCABULARY;
use crate::commands::ingest::db_setup::{ensure_schema, seed_media_types};
use crate::commands::ingest::writer::commit_records;

use super::queries::{
    alignment_averages, appearance_counts, media_spread, power_index, summarize_appearances,
};

fn test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("in-memory db");
    ensure_schema(&connection).expect("schema");
    seed_media_types(&connection, MEDIA_TYPE_VOCABULARY).expect("seed vocabulary");
    connection
}

fn character_record(
    id: i64,
    name: &str,
    films: &[&str],
    tv_shows: &[&str],
    video_games: &[&str],
) -> Value {
    json!({
        "_id": id,
        "name": name,
        "films": films,
        "shortFilms": [],
        "tvShows": tv_shows,
        "videoGames": video_games,
        "parkAttractions": [],
    })
}

fn hero_record(
    id: i64,
    name: &str,
    alignment: &str,
    intelligence: Option<i64>,
    strength: Option<i64>,
) -> Value {
    json!({
        "id": id,
        "name": name,
        "biography": { "publisher": "Marvel Comics", "alignment": alignment },
        "appearance": { "gender": "Male", "race": "Human", "height": [], "weight": [] },
        "powerstats": {
            "intelligence": intelligence,
            "strength": strength,
            "speed": null,
            "durability": null,
            "power": null,
            "combat": null,
        },
    })
}

#[test]
fn ranked_counts_and_spread_for_two_character_store() {
    let mut connection = test_connection();
    let records = vec![
        character_record(1, "Mickey Mouse", &["Fantasia", "Steamboat Willie"], &["Mickey Mouse Clubhouse"], &[]),
        character_record(2, "Horace Horsecollar", &[], &[], &[]),
    ];
    commit_records(&mut connection, Dataset::Disney, &records).expect("commit");

    let ranked = appearance_counts(&connection).expect("ranked counts");
    let counts: Vec<(i64, i64)> = ranked
        .iter()
        .map(|row| (row.character_id, row.appearances))
        .collect();
    assert_eq!(counts, vec![(1, 3), (2, 0)]);

    let spread = media_spread(&connection, 10).expect("spread");
    let spreads: Vec<(i64, i64)> = spread
        .iter()
        .map(|row| (row.character_id, row.spread))
        .collect();
    assert_eq!(spreads, vec![(1, 2), (2, 0)]);
}

#[test]
fn ranked_ties_break_by_ascending_id() {
    let mut connection = test_connection();
    let records = vec![
        character_record(7, "Pluto", &["Film X"], &[], &[]),
        character_record(3, "Goofy", &["Film Y"], &[], &[]),
    ];
    commit_records(&mut connection, Dataset::Disney, &records).expect("commit");

    let ranked = appearance_counts(&connection).expect("ranked counts");
    let ids: Vec<i64> = ranked.iter().map(|row| row.character_id).collect();
    assert_eq!(ids, vec![3, 7]);
}

#[test]
fn summary_reports_mean_and_top_slice() {
    let mut connection = test_connection();
    let records = vec![
        character_record(1, "Mickey Mouse", &["Fantasia", "Steamboat Willie"], &["Mickey Mouse Clubhouse"], &[]),
        character_record(2, "Horace Horsecollar", &[], &[], &[]),
    ];
    commit_records(&mut connection, Dataset::Disney, &records).expect("commit");

    let ranked = appearance_counts(&connection).expect("ranked counts");
    let summary = summarize_appearances(&ranked, 1);

    assert_eq!(summary.total_characters, 2);
    assert!((summary.mean_appearances - 1.5).abs() < f64::EPSILON);
    assert_eq!(summary.top.len(), 1);
    assert_eq!(summary.top[0].character_id, 1);
    assert_eq!(summary.top[0].appearances, 3);
}

#[test]
fn summary_of_empty_store_is_zeroed() {
    let connection = test_connection();
    let ranked = appearance_counts(&connection).expect("ranked counts");
    let summary = summarize_appearances(&ranked, 10);

    assert_eq!(summary.total_characters, 0);
    assert_eq!(summary.mean_appearances, 0.0);
    assert!(summary.top.is_empty());
}

#[test]
fn spread_stays_within_vocabulary_bounds() {
    let mut connection = test_connection();
    let records = vec![character_record(
        1,
        "Mickey Mouse",
        &["Fantasia"],
        &["Mickey Mouse Clubhouse"],
        &["Kingdom Hearts"],
    )];
    commit_records(&mut connection, Dataset::Disney, &records).expect("commit");

    let spread = media_spread(&connection, 10).expect("spread");
    assert_eq!(spread.len(), 1);
    assert_eq!(spread[0].spread, 3);
    assert!(spread[0].spread <= MEDIA_TYPE_VOCABULARY.len() as i64);
}

#[test]
fn spread_limit_is_applied() {
    let mut connection = test_connection();
    let records = vec![
        character_record(1, "Mickey Mouse", &["Fantasia"], &[], &[]),
        character_record(2, "Donald Duck", &[], &[], &[]),
    ];
    commit_records(&mut connection, Dataset::Disney, &records).expect("commit");

    let spread = media_spread(&connection, 1).expect("spread");
    assert_eq!(spread.len(), 1);
    assert_eq!(spread[0].character_id, 1);
}

#[test]
fn alignment_averages_skip_null_stats() {
    let mut connection = test_connection();
    let records = vec![
        hero_record(1, "Ant-Man", "good", None, Some(10)),
        hero_record(2, "Beast", "good", None, Some(20)),
        hero_record(3, "Bane", "bad", None, None),
    ];
    commit_records(&mut connection, Dataset::Heroes, &records).expect("commit");

    let averages = alignment_averages(&connection).expect("averages");
    assert_eq!(averages.len(), 2);

    let bad = &averages[0];
    assert_eq!(bad.alignment, "bad");
    assert_eq!(bad.strength, None);

    let good = &averages[1];
    assert_eq!(good.alignment, "good");
    assert_eq!(good.strength, Some(15.0));
    assert_eq!(good.intelligence, None);
}

#[test]
fn power_index_averages_non_null_stats_and_omits_empty_heroes() {
    let mut connection = test_connection();
    let records = vec![
        hero_record(1, "Ant-Man", "good", Some(20), Some(10)),
        hero_record(2, "Blank Slate", "bad", None, None),
        hero_record(3, "Beast", "good", Some(80), Some(40)),
    ];
    commit_records(&mut connection, Dataset::Heroes, &records).expect("commit");

    let ranked = power_index(&connection, 10).expect("power index");
    let indexed: Vec<(i64, f64)> = ranked
        .iter()
        .map(|row| (row.hero_id, row.power_index))
        .collect();
    assert_eq!(indexed, vec![(3, 60.0), (1, 15.0)]);
}

#[test]
fn power_index_limit_and_tie_break() {
    let mut connection = test_connection();
    let records = vec![
        hero_record(5, "Twin A", "good", Some(50), None),
        hero_record(2, "Twin B", "good", Some(50), None),
    ];
    commit_records(&mut connection, Dataset::Heroes, &records).expect("commit");

    let ranked = power_index(&connection, 10).expect("power index");
    let ids: Vec<i64> = ranked.iter().map(|row| row.hero_id).collect();
    assert_eq!(ids, vec![2, 5]);

    let limited = power_index(&connection, 1).expect("power index");
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].hero_id, 2);
}
