use serde::{Deserialize, Serialize};

/// One character record as returned by the paged Disney API. Every field is
/// optional; absent media lists deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCharacter {
    #[serde(rename = "_id")]
    pub id: Option<i64>,

    pub name: Option<String>,

    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub films: Vec<String>,

    #[serde(rename = "shortFilms", default)]
    pub short_films: Vec<String>,

    #[serde(rename = "tvShows", default)]
    pub tv_shows: Vec<String>,

    #[serde(rename = "videoGames", default)]
    pub video_games: Vec<String>,

    #[serde(rename = "parkAttractions", default)]
    pub park_attractions: Vec<String>,
}

/// One hero record from the superhero snapshot endpoint. Power stats arrive
/// as integers or strings depending on the API mirror, so they stay untyped
/// until parsed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHero {
    pub id: Option<i64>,

    pub name: Option<String>,

    #[serde(default)]
    pub biography: RawBiography,

    #[serde(default)]
    pub appearance: RawAppearance,

    #[serde(default)]
    pub powerstats: RawPowerstats,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBiography {
    pub publisher: Option<String>,
    pub alignment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAppearance {
    pub gender: Option<String>,
    pub race: Option<String>,

    #[serde(default)]
    pub height: Vec<String>,

    #[serde(default)]
    pub weight: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPowerstats {
    pub intelligence: Option<serde_json::Value>,
    pub strength: Option<serde_json::Value>,
    pub speed: Option<serde_json::Value>,
    pub durability: Option<serde_json::Value>,
    pub power: Option<serde_json::Value>,
    pub combat: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageDigest {
    pub page: u32,
    pub record_count: usize,
    pub payload_sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestPaths {
    pub data_root: String,
    pub db_path: String,
    pub manifest_path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestCounts {
    pub pages_fetched: usize,
    pub records_seen: usize,
    pub duplicates_skipped: usize,
    pub missing_id_skipped: usize,
    pub records_accepted: usize,
    pub characters_inserted: usize,
    pub appearance_rows_inserted: usize,
    pub heroes_inserted: usize,
    pub powerstat_rows_inserted: usize,
    pub lookup_rows_created: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub dataset: String,
    pub db_schema_version: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub base_url: String,
    pub quota: usize,
    pub paths: IngestPaths,
    pub counts: IngestCounts,
    pub page_digests: Vec<PageDigest>,
    pub warnings: Vec<String>,
}
